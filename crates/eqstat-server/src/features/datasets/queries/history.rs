//! History query: the most recent dataset records, newest first.
//!
//! The retention rule caps the table at five rows, but the query carries its
//! own LIMIT so the response is bounded even if the store were seeded by
//! hand.

use crate::features::datasets::RETENTION_LIMIT;
use chrono::{DateTime, Utc};
use eqstat_common::types::DatasetInfo;
use sqlx::SqlitePool;

#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryQuery;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, sqlx::FromRow)]
struct DatasetRow {
    id: i64,
    filename: String,
    stored_path: String,
    uploaded_at: DateTime<Utc>,
    total_count: i64,
    avg_flowrate: f64,
    avg_pressure: f64,
    avg_temperature: f64,
}

impl From<DatasetRow> for DatasetInfo {
    fn from(row: DatasetRow) -> Self {
        DatasetInfo {
            id: row.id,
            filename: row.filename,
            stored_path: row.stored_path,
            uploaded_at: row.uploaded_at,
            total_count: row.total_count,
            avg_flowrate: row.avg_flowrate,
            avg_pressure: row.avg_pressure,
            avg_temperature: row.avg_temperature,
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool, _query: HistoryQuery) -> Result<Vec<DatasetInfo>, HistoryError> {
    let rows: Vec<DatasetRow> = sqlx::query_as(
        r#"
        SELECT id, filename, stored_path, uploaded_at,
               total_count, avg_flowrate, avg_pressure, avg_temperature
        FROM datasets
        ORDER BY uploaded_at DESC, id DESC
        LIMIT ?1
        "#,
    )
    .bind(RETENTION_LIMIT as i64)
    .fetch_all(&pool)
    .await?;

    Ok(rows.into_iter().map(DatasetInfo::from).collect())
}

/// Fetch one record by id; `None` when the id is unknown.
pub async fn fetch_dataset(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<DatasetInfo>, HistoryError> {
    let row: Option<DatasetRow> = sqlx::query_as(
        r#"
        SELECT id, filename, stored_path, uploaded_at,
               total_count, avg_flowrate, avg_pressure, avg_temperature
        FROM datasets
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(DatasetInfo::from))
}
