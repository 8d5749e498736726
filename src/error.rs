//! Error types for loading and analysing programming grids.

use std::path::PathBuf;
use thiserror::Error;

/// Result type used across the library.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Input file is missing or unreadable.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A declared column is absent from the header row.
    #[error("{table}: missing column `{column}`")]
    MissingColumn { table: String, column: String },

    /// A cell could not be interpreted.
    #[error("{table}: row {row}, column `{column}`: invalid value {value:?}")]
    InvalidValue {
        table: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}
