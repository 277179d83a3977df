//! Feature modules implementing the eqstat API
//!
//! Each feature is a vertical slice with its own commands, queries, and
//! routes; route handlers call the `handle` functions directly.
//!
//! - **datasets**: CSV upload with retention enforcement, history, delete
//! - **reports**: one-page PDF summary per dataset
//! - **shared**: validation helpers used across slices

pub mod datasets;
pub mod reports;
pub mod shared;

use crate::storage::LocalStorage;
use axum::Router;
use sqlx::SqlitePool;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// SQLite connection pool holding the dataset records
    pub db: SqlitePool,
    /// Local filesystem storage for the uploaded backing files
    pub storage: LocalStorage,
}

/// Creates the API router with all feature routes mounted
///
/// - `/datasets` - upload, history, delete
/// - `/datasets/:id/report` - PDF report
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest("/datasets", datasets::datasets_routes())
        .merge(reports::reports_routes())
        .with_state(state)
}
