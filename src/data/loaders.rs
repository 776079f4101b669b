use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde_json::Value as JsonValue;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

use crate::data::row::{DataRow, DataValue};

/// Load a JSON array of objects into rows
pub fn load_json_rows<P: AsRef<Path>>(path: P) -> Result<Vec<DataRow>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open JSON file: {:?}", path.as_ref()))?;
    read_json_rows(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON file: {:?}", path.as_ref()))
}

/// Parse a JSON array of objects from any reader.
///
/// Array elements that are not objects are skipped with a warning.
pub fn read_json_rows<R: Read>(reader: R) -> Result<Vec<DataRow>> {
    let json_data: Vec<JsonValue> =
        serde_json::from_reader(reader).context("JSON data must be an array of objects")?;

    let mut rows = Vec::with_capacity(json_data.len());
    for (position, item) in json_data.iter().enumerate() {
        match DataRow::from_json(item) {
            Some(row) => rows.push(row),
            None => warn!(target: "loader", "Skipping non-object JSON element at {}", position),
        }
    }

    debug!(target: "loader", "Loaded {} rows from JSON", rows.len());
    Ok(rows)
}

/// Load a CSV file with a header line into rows
pub fn load_csv_rows<P: AsRef<Path>>(path: P) -> Result<Vec<DataRow>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path.as_ref()))?;
    read_csv_rows(file).with_context(|| format!("Failed to read CSV file: {:?}", path.as_ref()))
}

/// Parse CSV with headers from any reader, inferring a type per cell
pub fn read_csv_rows<R: Read>(reader: R) -> Result<Vec<DataRow>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: DataRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), DataValue::from_string(value)))
            .collect();
        rows.push(row);
    }

    debug!(
        target: "loader",
        "Loaded {} rows with {} columns from CSV",
        rows.len(),
        headers.len()
    );
    Ok(rows)
}

/// Pick a loader from the file extension
pub fn load_rows<P: AsRef<Path>>(path: P) -> Result<Vec<DataRow>> {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => load_json_rows(path),
        Some("csv") => load_csv_rows(path),
        _ => Err(anyhow::anyhow!(
            "Unsupported dataset format: {:?} (expected .json or .csv)",
            path.as_ref()
        )),
    }
}
