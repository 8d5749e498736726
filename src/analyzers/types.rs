//! Data types produced by the aggregation stage.

use crate::analyzers::parity::ParityTest;
use crate::classify::{ByGroup, Proportions};
use crate::join::JoinedAppearance;
use chrono::{DateTime, Utc};

/// Average recurrence, overall and per group. `None` means no data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recurrence {
    pub overall: Option<f64>,
    pub by_group: ByGroup<Option<f64>>,
}

/// Per-station counts.
#[derive(Debug, Clone, PartialEq)]
pub struct StationReport {
    pub name: String,
    /// Distinct diffusion identifiers.
    pub slot_count: usize,
    /// Flattened rows, null identifiers included.
    pub appearance_count: usize,
    /// Rows of each group's join table.
    pub group_appearances: ByGroup<usize>,
    pub recurrence: Recurrence,
}

/// A joined table kept for the debug dump.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinSample {
    pub label: String,
    pub rows: Vec<JoinedAppearance>,
}

/// Everything the text report prints.
#[derive(Debug, Clone)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub network: String,
    pub proportions: Option<Proportions>,
    pub unknown_gender: usize,
    pub sample: Option<JoinSample>,
    pub stations: Vec<StationReport>,
    /// Combined test over every station.
    pub parity: Option<ParityTest>,
    /// Filled only when per-station tests were requested.
    pub station_parity: Vec<(String, Option<ParityTest>)>,
}
