//! Run configuration: where the tables live and how the parity test is run.

use crate::analyzers::aggregate::AggregateOptions;
use crate::analyzers::parity::DEFAULT_ALPHA;
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_DATASET_DIR: &str = "dataset";
pub const DEFAULT_PERSONALITIES: &str = "personnality.csv";
pub const DEFAULT_NETWORK: &str = "Radio France";
pub const DEFAULT_STATIONS: [(&str, &str); 3] = [
    ("France Culture", "franceculture.csv"),
    ("France Info", "franceinfo.csv"),
    ("France Inter", "franceinter.csv"),
];

/// A named station grid file, written `Name=file.csv` on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationSource {
    pub name: String,
    pub file: PathBuf,
}

impl StationSource {
    pub fn new(name: &str, file: impl Into<PathBuf>) -> Self {
        StationSource {
            name: name.to_string(),
            file: file.into(),
        }
    }
}

impl FromStr for StationSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, file) = s
            .split_once('=')
            .ok_or_else(|| Error::InvalidConfig(format!("expected NAME=FILE, got {s:?}")))?;
        let (name, file) = (name.trim(), file.trim());
        if name.is_empty() || file.is_empty() {
            return Err(Error::InvalidConfig(format!("expected NAME=FILE, got {s:?}")));
        }
        Ok(StationSource::new(name, file))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub dataset_dir: PathBuf,
    /// Relative paths are resolved against `dataset_dir`.
    pub personalities: PathBuf,
    pub stations: Vec<StationSource>,
    pub network: String,
    pub alpha: f64,
    pub per_station: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dataset_dir: PathBuf::from(DEFAULT_DATASET_DIR),
            personalities: PathBuf::from(DEFAULT_PERSONALITIES),
            stations: default_stations(),
            network: DEFAULT_NETWORK.to_string(),
            alpha: DEFAULT_ALPHA,
            per_station: false,
        }
    }
}

pub fn default_stations() -> Vec<StationSource> {
    DEFAULT_STATIONS
        .iter()
        .map(|(name, file)| StationSource::new(name, *file))
        .collect()
}

impl Config {
    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.dataset_dir.join(file)
        }
    }

    pub fn personalities_path(&self) -> PathBuf {
        self.resolve(&self.personalities)
    }

    pub fn station_path(&self, station: &StationSource) -> PathBuf {
        self.resolve(&station.file)
    }

    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions {
            network: self.network.clone(),
            alpha: self.alpha,
            per_station: self.per_station,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.stations.is_empty() {
            return Err(Error::InvalidConfig("at least one station is required".into()));
        }

        let mut seen = HashSet::new();
        for station in &self.stations {
            if !seen.insert(station.name.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "station {:?} is listed twice",
                    station.name
                )));
            }
        }

        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "alpha must lie in (0, 1), got {}",
                self.alpha
            )));
        }

        Ok(())
    }
}
