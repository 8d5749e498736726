use crate::analyzers::parity::{DEFAULT_ALPHA, parity_test};
use crate::analyzers::recurrence::station_recurrence;
use crate::analyzers::types::{JoinSample, Report, StationReport};
use crate::classify::{Group, Partition, proportions};
use crate::join::JoinedStation;
use chrono::Utc;
use tracing::{info, warn};

/// Knobs for the aggregation stage.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub network: String,
    pub alpha: f64,
    pub per_station: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        AggregateOptions {
            network: "Radio France".to_string(),
            alpha: DEFAULT_ALPHA,
            per_station: false,
        }
    }
}

/// `France Culture` -> `france_culture`.
pub fn station_slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

pub fn summarize_station(station: &JoinedStation) -> StationReport {
    StationReport {
        name: station.name.clone(),
        slot_count: station.slot_count,
        appearance_count: station.appearances.len(),
        group_appearances: station.joined.map(Vec::len),
        recurrence: station_recurrence(&station.appearances, &station.joined),
    }
}

fn binary_counts(station: &JoinedStation) -> (u64, u64) {
    (
        station.joined.get(Group::Men).len() as u64,
        station.joined.get(Group::Women).len() as u64,
    )
}

/// Builds the full [`Report`] from the classified registry and the joined
/// station grids.
///
/// The parity test counts appearances: `n` is the number of appearances by
/// men or women over all stations, and the observed rate is the men's share
/// of them.
pub fn aggregate(
    partition: &Partition,
    stations: &[JoinedStation],
    options: &AggregateOptions,
) -> Report {
    let proportions = proportions(partition);
    let unknown_gender = partition.unknown_count();
    if unknown_gender > 0 {
        info!(
            unknown_gender,
            population = partition.population(),
            "Personalities without a declared gender are counted in the other group"
        );
    }

    let summaries: Vec<StationReport> = stations
        .iter()
        .map(|station| {
            let summary = summarize_station(station);
            info!(
                station = %summary.name,
                slots = summary.slot_count,
                appearances = summary.appearance_count,
                men = summary.group_appearances.men,
                women = summary.group_appearances.women,
                other = summary.group_appearances.other,
                "Station summarised"
            );
            summary
        })
        .collect();

    let (men, women) = stations
        .iter()
        .map(binary_counts)
        .fold((0, 0), |(m, w), (sm, sw)| (m + sm, w + sw));
    let parity = parity_test(men, women, options.alpha);
    match &parity {
        Some(test) => info!(
            n = test.n,
            observed_rate = test.observed_rate,
            z = test.z,
            p_value = test.p_value,
            "Parity test computed"
        ),
        None => warn!("No appearance by a man or a woman, parity test skipped"),
    }

    let station_parity = if options.per_station {
        stations
            .iter()
            .map(|station| {
                let (men, women) = binary_counts(station);
                (station.name.clone(), parity_test(men, women, options.alpha))
            })
            .collect()
    } else {
        Vec::new()
    };

    let sample = stations.first().map(|station| JoinSample {
        label: format!("grid_{}_men", station_slug(&station.name)),
        rows: station.joined.men.clone(),
    });

    Report {
        generated_at: Utc::now(),
        network: options.network.clone(),
        proportions,
        unknown_gender,
        sample,
        stations: summaries,
        parity,
        station_parity,
    }
}
