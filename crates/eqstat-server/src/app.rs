//! Router assembly.
//!
//! Everything under `/api/v1` sits behind the basic-auth guard; `/health`
//! stays open for liveness probes.

use crate::config::Config;
use crate::features::{self, FeatureState};
use crate::middleware::{self, auth};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

/// Build the application router with all routes and middleware.
pub fn build_router(state: FeatureState, config: &Config) -> Router {
    let credentials = Arc::new(config.auth.clone());

    let api_routes = features::router(state.clone()).layer(axum::middleware::from_fn_with_state(
        credentials,
        auth::require_basic_auth,
    ));

    Router::new()
        .route("/health", get(health_check))
        .with_state(state)
        .nest("/api/v1", api_routes)
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

/// Health check handler
async fn health_check(State(state): State<FeatureState>) -> Result<Response, StatusCode> {
    match sqlx::query("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => Ok((
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected"
            })),
        )
            .into_response()),
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
