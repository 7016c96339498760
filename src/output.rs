//! Output formatting and persistence for one-shot recovery reports.
//!
//! Supports pretty JSON logging and CSV append of comparative rows.

use anyhow::Result;
use tracing::{debug, info};

use crate::recovery::{ComparativeRow, RecoveryReport};
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs a full recovery report as pretty-printed JSON.
pub fn print_json(report: &RecoveryReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Appends comparative rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_rows(path: &str, rows: &[ComparativeRow]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = rows.len(), "Appending CSV rows");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
