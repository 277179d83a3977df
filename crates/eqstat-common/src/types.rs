//! Shared API payload types
//!
//! These types cross the wire between eqstat-server (which serializes them)
//! and eqstat-cli (which deserializes them), and are produced by the ingest
//! pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Frequency table over the `Type` column: count of rows per distinct value.
pub type TypeDistribution = BTreeMap<String, i64>;

/// Summary statistics over one uploaded dataset.
///
/// Averages are full precision as computed; [`SummaryStats::rounded`]
/// produces the user-facing payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_count: i64,
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,
}

impl SummaryStats {
    /// Copy with each average rounded half-up to 2 decimals.
    pub fn rounded(&self) -> Self {
        Self {
            total_count: self.total_count,
            avg_flowrate: round_half_up(self.avg_flowrate),
            avg_pressure: round_half_up(self.avg_pressure),
            avg_temperature: round_half_up(self.avg_temperature),
        }
    }
}

/// Round half-up to 2 decimal places.
///
/// Rounds through the third decimal first so that a value like 2.005, whose
/// f64 representation sits just below the true decimal, still rounds up.
pub fn round_half_up(value: f64) -> f64 {
    ((value * 1000.0).round() / 10.0).round() / 100.0
}

/// Truncated row sample returned alongside summary statistics.
///
/// Columns are listed in file order; every row has one cell per column, with
/// missing cells rendered as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One stored dataset record as returned by the history endpoint.
///
/// Averages here are the stored full-precision values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub id: i64,
    pub filename: String,
    /// Name of the backing file under the server's storage root.
    pub stored_path: String,
    pub uploaded_at: DateTime<Utc>,
    pub total_count: i64,
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,
}

impl DatasetInfo {
    pub fn stats(&self) -> SummaryStats {
        SummaryStats {
            total_count: self.total_count,
            avg_flowrate: self.avg_flowrate,
            avg_pressure: self.avg_pressure,
            avg_temperature: self.avg_temperature,
        }
    }
}

/// Response payload for a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub id: i64,
    pub uploaded_at: DateTime<Utc>,
    /// Rounded to 2 decimals for display; the stored record keeps full
    /// precision.
    pub summary: SummaryStats,
    pub type_distribution: TypeDistribution,
    pub preview: Preview,
}
