//! Delete command: remove one dataset record and its backing file.

use crate::storage::LocalStorage;
use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Clone, Copy)]
pub struct DeleteDatasetCommand {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteDatasetResponse {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteDatasetError {
    #[error("Dataset {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

#[tracing::instrument(skip(pool, storage), fields(dataset_id = command.id))]
pub async fn handle(
    pool: SqlitePool,
    storage: LocalStorage,
    command: DeleteDatasetCommand,
) -> Result<DeleteDatasetResponse, DeleteDatasetError> {
    let mut tx = pool.begin().await?;

    let row: Option<(String,)> = sqlx::query_as("SELECT stored_path FROM datasets WHERE id = ?1")
        .bind(command.id)
        .fetch_optional(&mut *tx)
        .await?;

    let Some((stored_path,)) = row else {
        return Err(DeleteDatasetError::NotFound(command.id));
    };

    sqlx::query("DELETE FROM datasets WHERE id = ?1")
        .bind(command.id)
        .execute(&mut *tx)
        .await?;

    // File removal happens inside the transaction window; an I/O failure
    // rolls the record back rather than leaving a dangling file.
    storage.remove(&stored_path).await?;

    tx.commit().await?;

    tracing::info!(dataset_id = command.id, "Dataset deleted");

    Ok(DeleteDatasetResponse { id: command.id })
}
