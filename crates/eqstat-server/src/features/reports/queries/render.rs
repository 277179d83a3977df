//! Render query: one fixed-layout PDF page for a stored dataset.
//!
//! The page is a title plus one line per stored field, in a fixed order. No
//! pagination, no dynamic layout. Averages print at stored precision; the
//! rounded values only exist in the upload payload.

use crate::features::datasets::queries::history::{self, HistoryError};
use eqstat_common::types::DatasetInfo;
use genpdf::elements::{Break, Paragraph};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::{Document, SimplePageDecorator};
use sqlx::SqlitePool;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy)]
pub struct RenderReportQuery {
    pub id: i64,
}

/// A rendered report ready to ship as an attachment.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderReportError {
    #[error("Dataset {0} not found")]
    NotFound(i64),

    #[error("No usable TTF font family found - set EQSTAT_FONT_DIR")]
    FontsUnavailable,

    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Database(#[from] HistoryError),
}

#[tracing::instrument(skip(pool), fields(dataset_id = query.id))]
pub async fn handle(
    pool: SqlitePool,
    query: RenderReportQuery,
) -> Result<ReportDocument, RenderReportError> {
    let dataset = history::fetch_dataset(&pool, query.id)
        .await?
        .ok_or(RenderReportError::NotFound(query.id))?;

    let bytes = render_pdf(&dataset)?;

    tracing::info!(dataset_id = dataset.id, size = bytes.len(), "Report rendered");

    Ok(ReportDocument {
        filename: format!("report_{}.pdf", dataset.id),
        bytes,
    })
}

/// The report body, one field per line, in render order.
pub fn report_lines(dataset: &DatasetInfo) -> Vec<String> {
    vec![
        format!(
            "Uploaded At: {}",
            dataset.uploaded_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        format!("Total Equipment Count: {}", dataset.total_count),
        format!("Avg Flowrate: {}", dataset.avg_flowrate),
        format!("Avg Pressure: {}", dataset.avg_pressure),
        format!("Avg Temperature: {}", dataset.avg_temperature),
    ]
}

pub fn report_title(dataset: &DatasetInfo) -> String {
    format!("Chemical Equipment Report (ID: {})", dataset.id)
}

fn render_pdf(dataset: &DatasetInfo) -> Result<Vec<u8>, RenderReportError> {
    let font_family = load_font_family()?;

    let mut doc = Document::new(font_family);
    doc.set_title(report_title(dataset));

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(30);
    doc.set_page_decorator(decorator);

    let title_style = genpdf::style::Style::new().bold().with_font_size(16);
    doc.push(Paragraph::new(genpdf::style::StyledString::new(
        report_title(dataset),
        title_style,
    )));
    doc.push(Break::new(1));

    for line in report_lines(dataset) {
        doc.push(Paragraph::new(line));
        doc.push(Break::new(0.5));
    }

    let mut bytes = Vec::new();
    doc.render(&mut bytes)
        .map_err(|e| RenderReportError::Render(e.to_string()))?;

    Ok(bytes)
}

/// Locate a TTF family, trying the configured directory before the usual
/// system locations.
fn load_font_family() -> Result<FontFamily<FontData>, RenderReportError> {
    let mut candidates: Vec<(PathBuf, &str)> = Vec::new();

    if let Ok(dir) = std::env::var("EQSTAT_FONT_DIR") {
        candidates.push((PathBuf::from(dir), "LiberationSans"));
    }
    candidates.push(("/usr/share/fonts/truetype/liberation".into(), "LiberationSans"));
    candidates.push(("/usr/share/fonts/liberation-sans".into(), "LiberationSans"));
    candidates.push(("/usr/share/fonts/TTF".into(), "LiberationSans"));

    for (dir, name) in candidates {
        if let Ok(family) = genpdf::fonts::from_files(&dir, name, None) {
            return Ok(family);
        }
    }

    Err(RenderReportError::FontsUnavailable)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dataset() -> DatasetInfo {
        DatasetInfo {
            id: 3,
            filename: "equipment.csv".to_string(),
            stored_path: "abc_equipment.csv".to_string(),
            uploaded_at: chrono::Utc.with_ymd_and_hms(2026, 8, 6, 12, 30, 0).unwrap(),
            total_count: 3,
            avg_flowrate: 20.0,
            avg_pressure: 3.5,
            avg_temperature: 90.0,
        }
    }

    #[test]
    fn test_report_title_names_id() {
        assert_eq!(
            report_title(&dataset()),
            "Chemical Equipment Report (ID: 3)"
        );
    }

    #[test]
    fn test_report_lines_fixed_order() {
        let lines = report_lines(&dataset());
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Uploaded At: 2026-08-06 12:30:00 UTC");
        assert_eq!(lines[1], "Total Equipment Count: 3");
        assert_eq!(lines[2], "Avg Flowrate: 20");
        assert_eq!(lines[3], "Avg Pressure: 3.5");
        assert_eq!(lines[4], "Avg Temperature: 90");
    }

    // Rendering itself needs a TTF family on disk, so the PDF bytes are not
    // exercised here; the 404 path is covered by the router tests.
}
