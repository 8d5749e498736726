//! CSV loader for the personalities registry and the station grids.
//!
//! Both tables are keyed: rows sharing a key are collapsed to the last
//! occurrence in file order.

use crate::error::{Error, Result};
use csv::StringRecord;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub const PERSONALITY_COLUMNS: [&str; 3] = ["uuid", "gender", "isOrganisation"];
pub const GRID_COLUMNS: [&str; 2] = ["diffusion_id", "personality_ids"];

/// A person or organisation that may appear in a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Personality {
    pub uuid: String,
    pub gender: Option<String>,
    pub is_organisation: bool,
}

/// One scheduled broadcast unit of a station.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub diffusion_id: String,
    /// Raw identifier text, e.g. `"a|b c"`.
    pub personality_ids: Option<String>,
    /// Remaining columns in header order.
    pub attributes: Vec<(String, Option<String>)>,
}

/// Rows that carry a natural key.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Personality {
    fn key(&self) -> &str {
        &self.uuid
    }
}

impl Keyed for Slot {
    fn key(&self) -> &str {
        &self.diffusion_id
    }
}

#[derive(Deserialize)]
struct PersonalityRow {
    uuid: String,
    gender: Option<String>,
    #[serde(rename = "isOrganisation")]
    is_organisation: Option<String>,
}

impl PersonalityRow {
    fn into_personality(self, table: &str, row: usize) -> Result<Personality> {
        let raw = self.is_organisation.unwrap_or_default();
        let is_organisation = parse_flag(&raw).ok_or_else(|| Error::InvalidValue {
            table: table.to_string(),
            row,
            column: "isOrganisation".to_string(),
            value: raw.clone(),
        })?;

        Ok(Personality {
            uuid: self.uuid,
            gender: self.gender,
            is_organisation,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "True" | "true" | "TRUE" | "1" => Some(true),
        "False" | "false" | "FALSE" | "0" => Some(false),
        _ => None,
    }
}

/// Keeps one row per key: the one occurring last. Survivors stay in the
/// order of their last occurrence.
pub fn dedup_keep_last<T: Keyed>(rows: Vec<T>) -> Vec<T> {
    let mut last: HashMap<String, usize> = HashMap::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        last.insert(row.key().to_string(), i);
    }

    rows.into_iter()
        .enumerate()
        .filter(|(i, row)| last.get(row.key()) == Some(i))
        .map(|(_, row)| row)
        .collect()
}

fn column_index(table: &str, headers: &StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| Error::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        })
}

fn check_columns(table: &str, headers: &StringRecord, required: &[&str]) -> Result<()> {
    for column in required {
        column_index(table, headers, column)?;
    }
    Ok(())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn table_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table")
        .to_string()
}

/// Loads and deduplicates the personalities registry at `path`.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn load_personalities(path: &Path) -> Result<Vec<Personality>> {
    read_personalities(open(path)?, &table_name(path))
}

/// Loads and deduplicates a station grid at `path`.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn load_grid(path: &Path) -> Result<Vec<Slot>> {
    read_grid(open(path)?, &table_name(path))
}

pub fn read_personalities<R: Read>(reader: R, table: &str) -> Result<Vec<Personality>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    check_columns(table, &headers, &PERSONALITY_COLUMNS)?;

    let mut rows = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        let raw: PersonalityRow = result?;
        rows.push(raw.into_personality(table, i + 1)?);
    }

    let read = rows.len();
    let rows = dedup_keep_last(rows);
    debug!(table, read, kept = rows.len(), "Personalities loaded");
    Ok(rows)
}

pub fn read_grid<R: Read>(reader: R, table: &str) -> Result<Vec<Slot>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    check_columns(table, &headers, &GRID_COLUMNS)?;

    let id_col = column_index(table, &headers, "diffusion_id")?;
    let ids_col = column_index(table, &headers, "personality_ids")?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let cell = |i: usize| record.get(i).filter(|v| !v.is_empty()).map(str::to_string);

        let attributes = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != id_col && *i != ids_col)
            .map(|(i, name)| (name.to_string(), cell(i)))
            .collect();

        rows.push(Slot {
            diffusion_id: record.get(id_col).unwrap_or_default().to_string(),
            personality_ids: cell(ids_col),
            attributes,
        });
    }

    let read = rows.len();
    let rows = dedup_keep_last(rows);
    debug!(table, read, kept = rows.len(), "Grid loaded");
    Ok(rows)
}
