use crate::api::response::ErrorResponse;
use crate::features::FeatureState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::queries::{self, RenderReportError, RenderReportQuery};

pub fn reports_routes() -> Router<FeatureState> {
    Router::new().route("/datasets/:id/report", get(download_report))
}

#[tracing::instrument(skip(state), fields(dataset_id = id))]
async fn download_report(
    State(state): State<FeatureState>,
    Path(id): Path<i64>,
) -> Result<Response, ReportApiError> {
    let query = RenderReportQuery { id };
    let document = queries::render::handle(state.db, query).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.filename),
        ),
    ];

    Ok((StatusCode::OK, headers, document.bytes).into_response())
}

#[derive(Debug)]
struct ReportApiError(RenderReportError);

impl From<RenderReportError> for ReportApiError {
    fn from(err: RenderReportError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ReportApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            RenderReportError::NotFound(id) => {
                let error = ErrorResponse::new("NOT_FOUND", format!("Dataset {id} not found"));
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            }
            RenderReportError::FontsUnavailable | RenderReportError::Render(_) => {
                tracing::error!("Report rendering error: {}", self.0);
                let error = ErrorResponse::new("RENDER_ERROR", "Report rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            }
            RenderReportError::Database(_) => {
                tracing::error!("Database error: {}", self.0);
                let error = ErrorResponse::new("DATABASE_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            }
        }
    }
}
