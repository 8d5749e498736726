//! Text rendering of the [`Report`].
//!
//! The report goes to stdout in a fixed order; logs stay on stderr.

use crate::analyzers::parity::ParityTest;
use crate::analyzers::types::Report;
use crate::classify::Group;
use crate::join::JoinedAppearance;
use std::io::{self, Write};
use tracing::debug;

const NO_DATA: &str = "no data";
const NULL_CELL: &str = "NaN";
/// Rows shown on each side of the ellipsis of a long table.
const EDGE_ROWS: usize = 5;

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => NO_DATA.to_string(),
    }
}

fn average(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.0}"),
        None => NO_DATA.to_string(),
    }
}

fn verdict_line(test: Option<&ParityTest>, subject: &str) -> String {
    match test {
        Some(test) => format!("It is likely that {} in {subject}", test.verdict),
        None => format!("Not enough data to test equity in {subject} ({NO_DATA})"),
    }
}

/// Renders a joined table the way pandas prints a DataFrame: a header row,
/// right-aligned cells, and at most ten rows.
pub fn render_join_table(rows: &[JoinedAppearance]) -> String {
    let attribute_names: Vec<&str> = rows
        .first()
        .map(|r| r.appearance.attributes.iter().map(|(k, _)| k.as_str()).collect())
        .unwrap_or_default();

    let mut columns = vec!["diffusion_id", "personality_ids"];
    columns.extend(attribute_names.iter().copied());
    columns.extend(["uuid", "gender", "isOrganisation"]);

    if rows.is_empty() {
        return format!("Empty DataFrame\nColumns: [{}]\nIndex: []", columns.join(", "));
    }

    let cells = |row: &JoinedAppearance| -> Vec<String> {
        let opt = |v: Option<&str>| v.unwrap_or(NULL_CELL).to_string();
        let mut out = vec![
            row.appearance.diffusion_id.clone(),
            opt(row.appearance.personality_id.as_deref()),
        ];
        out.extend(row.appearance.attributes.iter().map(|(_, v)| opt(v.as_deref())));
        out.push(row.personality.uuid.clone());
        out.push(opt(row.personality.gender.as_deref()));
        let flag = if row.personality.is_organisation { "True" } else { "False" };
        out.push(flag.to_string());
        out
    };

    let truncated = rows.len() > EDGE_ROWS * 2;
    let mut body: Vec<(String, Vec<String>)> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        if truncated && i == EDGE_ROWS {
            body.push(("...".to_string(), vec!["...".to_string(); columns.len()]));
        }
        if truncated && i >= EDGE_ROWS && i < rows.len() - EDGE_ROWS {
            continue;
        }
        body.push((i.to_string(), cells(row)));
    }

    let index_width = body.iter().map(|(idx, _)| idx.len()).max().unwrap_or(0);
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(c, name)| {
            body.iter()
                .map(|(_, values)| values.get(c).map_or(0, |v| v.chars().count()))
                .max()
                .unwrap_or(0)
                .max(name.chars().count())
        })
        .collect();

    let mut lines = Vec::with_capacity(body.len() + 3);
    let mut header = " ".repeat(index_width);
    for (name, &width) in columns.iter().zip(&widths) {
        header.push_str(&format!("  {name:>width$}"));
    }
    lines.push(header);

    for (idx, values) in &body {
        let mut line = format!("{idx:<index_width$}");
        for (value, &width) in values.iter().zip(&widths) {
            line.push_str(&format!("  {value:>width$}"));
        }
        lines.push(line);
    }

    if truncated {
        lines.push(String::new());
        lines.push(format!("[{} rows x {} columns]", rows.len(), columns.len()));
    }

    lines.join("\n")
}

/// Writes the full text report to `out`.
pub fn write_report<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    let proportions = report.proportions;
    writeln!(
        out,
        "Men represent {} of the people in the dataset",
        percent(proportions.map(|p| p.men))
    )?;
    writeln!(
        out,
        "Women represent {} of the people in the dataset",
        percent(proportions.map(|p| p.women))
    )?;
    writeln!(
        out,
        "Others represent {} of the people in the dataset",
        percent(proportions.map(|p| p.other))
    )?;

    if let Some(sample) = &report.sample {
        writeln!(out, "{}={}", sample.label, render_join_table(&sample.rows))?;
    }

    for station in &report.stations {
        writeln!(
            out,
            "Out of {} emissions, {} personalities appeared in {}",
            station.slot_count, station.appearance_count, station.name
        )?;
    }

    writeln!(out)?;
    for station in &report.stations {
        writeln!(
            out,
            "Average of time people reappeared in {}: {}",
            station.name,
            average(station.recurrence.overall)
        )?;
    }

    for (group, noun) in Group::ALL.into_iter().zip(["men", "woman", "other"]) {
        writeln!(out)?;
        for station in &report.stations {
            writeln!(
                out,
                "Average of time {noun} reappeared in {} : {}",
                station.name,
                average(*station.recurrence.by_group.get(group))
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Performing normal approximation test for {}", report.network)?;
    writeln!(out, "{}", verdict_line(report.parity.as_ref(), &report.network))?;
    for (station, test) in &report.station_parity {
        writeln!(out, "{}", verdict_line(test.as_ref(), station))?;
    }

    Ok(())
}
