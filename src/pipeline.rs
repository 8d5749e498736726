//! Stage composition: load, normalise, classify and join, aggregate.
//!
//! Each stage only sees what the previous one returned.

use crate::analyzers::aggregate::{AggregateOptions, aggregate};
use crate::analyzers::types::Report;
use crate::classify::{Partition, classify};
use crate::config::{Config, StationSource};
use crate::error::Result;
use crate::grid::{Appearance, normalize};
use crate::join::JoinedStation;
use crate::loader::{Personality, Slot, load_grid, load_personalities};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LoadedStation {
    pub source: StationSource,
    pub slots: Vec<Slot>,
}

/// Deduplicated source tables.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub personalities: Vec<Personality>,
    pub stations: Vec<LoadedStation>,
}

#[derive(Debug, Clone)]
pub struct NormalizedStation {
    pub name: String,
    pub slot_count: usize,
    pub appearances: Vec<Appearance>,
}

/// Reads every table named by `config`. Fails on the first unreadable file
/// or missing column.
#[tracing::instrument(skip_all)]
pub fn load(config: &Config) -> Result<Dataset> {
    let personalities = load_personalities(&config.personalities_path())?;
    info!(rows = personalities.len(), "Personalities registry loaded");

    let mut stations = Vec::with_capacity(config.stations.len());
    for source in &config.stations {
        let slots = load_grid(&config.station_path(source))?;
        info!(station = %source.name, slots = slots.len(), "Station grid loaded");
        stations.push(LoadedStation {
            source: source.clone(),
            slots,
        });
    }

    Ok(Dataset {
        personalities,
        stations,
    })
}

pub fn normalize_stations(stations: Vec<LoadedStation>) -> Vec<NormalizedStation> {
    stations
        .into_iter()
        .map(|station| {
            let slot_count = station.slots.len();
            let appearances = normalize(station.slots);
            debug!(
                station = %station.source.name,
                slot_count,
                appearances = appearances.len(),
                "Grid flattened"
            );
            NormalizedStation {
                name: station.source.name,
                slot_count,
                appearances,
            }
        })
        .collect()
}

pub fn join_stations(stations: Vec<NormalizedStation>, partition: &Partition) -> Vec<JoinedStation> {
    stations
        .into_iter()
        .map(|s| JoinedStation::new(&s.name, s.slot_count, s.appearances, partition))
        .collect()
}

/// Runs every in-memory stage over an already loaded dataset.
#[tracing::instrument(skip_all)]
pub fn analyze(dataset: Dataset, options: &AggregateOptions) -> Report {
    let stations = normalize_stations(dataset.stations);
    let partition = classify(&dataset.personalities);
    debug!(population = partition.population(), "Personalities classified");

    let joined = join_stations(stations, &partition);
    aggregate(&partition, &joined, options)
}

/// Validates `config`, loads the tables and builds the report.
pub fn run(config: &Config) -> Result<Report> {
    config.validate()?;
    let dataset = load(config)?;
    Ok(analyze(dataset, &config.aggregate_options()))
}
