//! Database pool setup and schema initialization.
//!
//! The retention store is a single `datasets` table in SQLite; the schema is
//! applied at startup with idempotent DDL.

use crate::config::DatabaseConfig;
use eqstat_common::{EqstatError, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::time::Duration;

/// Connect a pool using the configured URL and limits.
pub async fn init_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| EqstatError::Database(e.to_string()))?;

    Ok(pool)
}

/// Apply the schema. Safe to run on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS datasets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            filename TEXT NOT NULL,
            stored_path TEXT NOT NULL,
            uploaded_at TEXT NOT NULL,
            total_count INTEGER NOT NULL,
            avg_flowrate REAL NOT NULL,
            avg_pressure REAL NOT NULL,
            avg_temperature REAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| EqstatError::Database(e.to_string()))?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_datasets_uploaded_at ON datasets (uploaded_at DESC, id DESC)",
    )
    .execute(pool)
    .await
    .map_err(|e| EqstatError::Database(e.to_string()))?;

    Ok(())
}
