//! Upload command: validate, summarize, enforce retention, persist.
//!
//! The record is inserted fully populated in the same transaction that
//! evicts datasets beyond the retention limit, so the store never holds a
//! partial record and never exceeds the cap after a successful upload.

use crate::features::datasets::RETENTION_LIMIT;
use crate::features::shared::validation::{validate_filename, FilenameValidationError};
use crate::storage::LocalStorage;
use chrono::{DateTime, Utc};
use eqstat_common::types::{SummaryStats, UploadReceipt};
use eqstat_ingest::{CsvSummary, IngestError};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UploadDatasetCommand {
    pub filename: String,
    pub content: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadDatasetError {
    #[error(transparent)]
    Filename(#[from] FilenameValidationError),

    #[error("Content is required and cannot be empty")]
    ContentRequired,

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl UploadDatasetCommand {
    pub fn validate(&self) -> Result<(), UploadDatasetError> {
        validate_filename(&self.filename)?;
        if self.content.is_empty() {
            return Err(UploadDatasetError::ContentRequired);
        }
        Ok(())
    }
}

#[tracing::instrument(skip(pool, storage, command), fields(filename = %command.filename, size = command.content.len()))]
pub async fn handle(
    pool: SqlitePool,
    storage: LocalStorage,
    command: UploadDatasetCommand,
) -> Result<UploadReceipt, UploadDatasetError> {
    command.validate()?;

    // Summarize before anything touches disk; a validation failure leaves no
    // trace to roll back.
    let summary = eqstat_ingest::summarize(&command.content)?;

    let stored_path = format!("{}_{}", Uuid::new_v4(), command.filename);
    storage.write(&stored_path, &command.content).await?;

    let uploaded_at = Utc::now();
    match persist(&pool, &storage, &command.filename, &stored_path, uploaded_at, &summary).await {
        Ok(id) => {
            tracing::info!(
                dataset_id = id,
                rows = summary.stats.total_count,
                "Dataset stored"
            );
            Ok(UploadReceipt {
                id,
                uploaded_at,
                summary: summary.stats.rounded(),
                type_distribution: summary.type_distribution,
                preview: summary.preview,
            })
        }
        Err(err) => {
            // The record did not commit; drop the freshly written file too.
            if let Err(cleanup) = storage.remove(&stored_path).await {
                tracing::error!(error = %cleanup, path = %stored_path, "Failed to clean up backing file after aborted upload");
            }
            Err(err)
        }
    }
}

/// Run the retention check-delete-insert sequence in one transaction.
///
/// Backing files of evicted records are removed before the commit: if a
/// removal fails the transaction rolls back, and removal of an already
/// absent file is idempotent on the retry.
async fn persist(
    pool: &SqlitePool,
    storage: &LocalStorage,
    filename: &str,
    stored_path: &str,
    uploaded_at: DateTime<Utc>,
    summary: &CsvSummary,
) -> Result<i64, UploadDatasetError> {
    let mut tx = pool.begin().await?;

    let existing: Vec<(i64, String)> =
        sqlx::query_as("SELECT id, stored_path FROM datasets ORDER BY uploaded_at DESC, id DESC")
            .fetch_all(&mut *tx)
            .await?;

    let evicted: Vec<(i64, String)> = if existing.len() >= RETENTION_LIMIT {
        // Keep the 4 newest; the insert below brings the total back to 5.
        existing[RETENTION_LIMIT - 1..].to_vec()
    } else {
        Vec::new()
    };

    for (id, _) in &evicted {
        sqlx::query("DELETE FROM datasets WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }

    for (id, path) in &evicted {
        storage.remove(path).await?;
        tracing::info!(dataset_id = id, "Evicted dataset beyond retention limit");
    }

    let stats: &SummaryStats = &summary.stats;
    let result = sqlx::query(
        r#"
        INSERT INTO datasets
            (filename, stored_path, uploaded_at, total_count, avg_flowrate, avg_pressure, avg_temperature)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(filename)
    .bind(stored_path)
    .bind(uploaded_at)
    .bind(stats.total_count)
    .bind(stats.avg_flowrate)
    .bind(stats.avg_pressure)
    .bind(stats.avg_temperature)
    .execute(&mut *tx)
    .await?;

    let id = result.last_insert_rowid();
    tx.commit().await?;

    Ok(id)
}
