//! Terminal table rendering for summaries, distributions, and previews.

use chrono::{DateTime, Utc};
use comfy_table::Table;
use eqstat_common::types::{DatasetInfo, Preview, SummaryStats, TypeDistribution};

/// Timestamp format used in all CLI tables.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// One-row table of the summary statistics.
pub fn summary_table(stats: &SummaryStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Total Count",
        "Avg Flowrate",
        "Avg Pressure",
        "Avg Temperature",
    ]);
    table.add_row(vec![
        stats.total_count.to_string(),
        stats.avg_flowrate.to_string(),
        stats.avg_pressure.to_string(),
        stats.avg_temperature.to_string(),
    ]);
    table
}

/// Count of rows per equipment type.
pub fn distribution_table(distribution: &TypeDistribution) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Type", "Count"]);
    for (equipment_type, count) in distribution {
        table.add_row(vec![equipment_type.clone(), count.to_string()]);
    }
    table
}

/// The preview rows, columns in file order.
pub fn preview_table(preview: &Preview) -> Table {
    let mut table = Table::new();
    table.set_header(preview.columns.clone());
    for row in &preview.rows {
        table.add_row(row.clone());
    }
    table
}

/// History listing, one row per stored dataset.
pub fn history_table(datasets: &[DatasetInfo]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Filename",
        "Uploaded At",
        "Rows",
        "Avg Flowrate",
        "Avg Pressure",
        "Avg Temperature",
    ]);
    for dataset in datasets {
        table.add_row(vec![
            dataset.id.to_string(),
            dataset.filename.clone(),
            format_timestamp(&dataset.uploaded_at),
            dataset.total_count.to_string(),
            dataset.avg_flowrate.to_string(),
            dataset.avg_pressure.to_string(),
            dataset.avg_temperature.to_string(),
        ]);
    }
    table
}
