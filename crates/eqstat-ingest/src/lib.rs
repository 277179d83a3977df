//! Ingestion & summary pipeline for uploaded equipment CSV files.
//!
//! A single linear transform: validate the header, walk the rows once, and
//! produce exact statistics over the full dataset plus a truncated preview.
//! The caller decides what to persist; this crate never touches disk.
//!
//! Required columns (exact name match): `Equipment Name`, `Type`,
//! `Flowrate`, `Pressure`, `Temperature`.

use eqstat_common::types::{Preview, SummaryStats, TypeDistribution};
use std::collections::BTreeMap;
use thiserror::Error;

/// Columns every upload must carry, by exact header name.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Equipment Name",
    "Type",
    "Flowrate",
    "Pressure",
    "Temperature",
];

/// The numeric columns that are averaged.
pub const NUMERIC_COLUMNS: [&str; 3] = ["Flowrate", "Pressure", "Temperature"];

/// Preview rows never exceed this, regardless of input size.
pub const PREVIEW_ROW_LIMIT: usize = 50;

/// Result type alias for ingest operations
pub type IngestResult<T> = std::result::Result<T, IngestError>;

/// Validation and parse failures surfaced to the uploader.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Column '{column}' has a non-numeric value at row {row}")]
    InvalidNumber { column: String, row: usize },

    #[error("File contains no data rows")]
    Empty,

    #[error("Column '{column}' has no numeric values to average")]
    NoNumericValues { column: String },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}

/// Everything derived from one uploaded file.
#[derive(Debug, Clone)]
pub struct CsvSummary {
    /// Exact over the full dataset, full precision.
    pub stats: SummaryStats,
    pub type_distribution: TypeDistribution,
    pub preview: Preview,
}

/// Parse and summarize one uploaded CSV file.
///
/// Statistics cover every data row; the preview stops at
/// [`PREVIEW_ROW_LIMIT`] rows. Empty cells in a numeric column are excluded
/// from that column's mean; a non-empty cell that does not parse as a number
/// is a hard failure. Rows shorter than the header render missing cells as
/// empty strings.
pub fn summarize(bytes: &[u8]) -> IngestResult<CsvSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let columns: Vec<String> = headers.iter().map(str::to_string).collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !columns.iter().any(|c| c == *required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns(missing));
    }

    // Indices are safe to unwrap-by-construction after the check above, but
    // resolve them without panicking all the same.
    let column_index = |name: &str| columns.iter().position(|c| c == name);
    let type_index = column_index("Type").ok_or_else(|| {
        IngestError::MissingColumns(vec!["Type".to_string()])
    })?;
    let mut numeric_indices = [0usize; 3];
    for (slot, name) in NUMERIC_COLUMNS.iter().enumerate() {
        numeric_indices[slot] = column_index(name)
            .ok_or_else(|| IngestError::MissingColumns(vec![name.to_string()]))?;
    }

    let mut row_count: i64 = 0;
    let mut sums = [0f64; 3];
    let mut counts = [0i64; 3];
    let mut type_distribution: TypeDistribution = BTreeMap::new();
    let mut preview_rows: Vec<Vec<String>> = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        row_count += 1;

        for (slot, name) in NUMERIC_COLUMNS.iter().enumerate() {
            let raw = record.get(numeric_indices[slot]).unwrap_or("").trim();
            if raw.is_empty() {
                continue;
            }
            let value: f64 = raw.parse().map_err(|_| IngestError::InvalidNumber {
                column: name.to_string(),
                row: row + 1,
            })?;
            sums[slot] += value;
            counts[slot] += 1;
        }

        let type_value = record.get(type_index).unwrap_or("").trim();
        if !type_value.is_empty() {
            *type_distribution.entry(type_value.to_string()).or_insert(0) += 1;
        }

        if preview_rows.len() < PREVIEW_ROW_LIMIT {
            let cells = (0..columns.len())
                .map(|i| record.get(i).unwrap_or("").to_string())
                .collect();
            preview_rows.push(cells);
        }
    }

    if row_count == 0 {
        return Err(IngestError::Empty);
    }

    let mut averages = [0f64; 3];
    for (slot, name) in NUMERIC_COLUMNS.iter().enumerate() {
        if counts[slot] == 0 {
            return Err(IngestError::NoNumericValues {
                column: name.to_string(),
            });
        }
        averages[slot] = sums[slot] / counts[slot] as f64;
    }

    tracing::debug!(
        rows = row_count,
        types = type_distribution.len(),
        preview = preview_rows.len(),
        "CSV summarized"
    );

    Ok(CsvSummary {
        stats: SummaryStats {
            total_count: row_count,
            avg_flowrate: averages[0],
            avg_pressure: averages[1],
            avg_temperature: averages[2],
        },
        type_distribution,
        preview: Preview {
            columns,
            rows: preview_rows,
        },
    })
}
