use crate::api::response::{ApiResponse, ErrorResponse};
use crate::features::FeatureState;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, post},
    Json, Router,
};

use super::{
    commands::{self, DeleteDatasetCommand, DeleteDatasetError, UploadDatasetCommand, UploadDatasetError},
    queries::{self, HistoryQuery},
};

/// Maximum upload size: 32 MiB
pub const MAX_UPLOAD_SIZE: usize = 32 * 1024 * 1024;

pub fn datasets_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", post(upload_dataset).get(history))
        .route("/:id", delete(delete_dataset))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE))
}

#[tracing::instrument(skip(state, multipart))]
async fn upload_dataset(
    State(state): State<FeatureState>,
    mut multipart: Multipart,
) -> Result<Response, DatasetApiError> {
    let mut filename: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DatasetApiError::Multipart(format!("Failed to read multipart field: {e}")))?
    {
        if field.name() == Some("file") {
            filename = field.file_name().map(|s| s.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| DatasetApiError::Multipart(format!("Failed to read file bytes: {e}")))?;
            content = Some(data.to_vec());
        }
    }

    let content =
        content.ok_or_else(|| DatasetApiError::Multipart("No file field found in multipart data".to_string()))?;

    let command = UploadDatasetCommand {
        filename: filename.unwrap_or_else(|| "upload.csv".to_string()),
        content,
    };

    let receipt = commands::upload::handle(state.db, state.storage, command).await?;

    tracing::info!(
        dataset_id = receipt.id,
        rows = receipt.summary.total_count,
        "Dataset uploaded via API"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::success(receipt))).into_response())
}

#[tracing::instrument(skip(state))]
async fn history(State(state): State<FeatureState>) -> Result<Response, DatasetApiError> {
    let datasets = queries::history::handle(state.db, HistoryQuery).await?;

    tracing::debug!(count = datasets.len(), "History listed via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(datasets))).into_response())
}

#[tracing::instrument(skip(state), fields(dataset_id = id))]
async fn delete_dataset(
    State(state): State<FeatureState>,
    Path(id): Path<i64>,
) -> Result<Response, DatasetApiError> {
    let command = DeleteDatasetCommand { id };
    let response = commands::delete::handle(state.db, state.storage, command).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

#[derive(Debug)]
enum DatasetApiError {
    Multipart(String),
    Upload(UploadDatasetError),
    Delete(DeleteDatasetError),
    History(queries::HistoryError),
}

impl From<UploadDatasetError> for DatasetApiError {
    fn from(err: UploadDatasetError) -> Self {
        Self::Upload(err)
    }
}

impl From<DeleteDatasetError> for DatasetApiError {
    fn from(err: DeleteDatasetError) -> Self {
        Self::Delete(err)
    }
}

impl From<queries::HistoryError> for DatasetApiError {
    fn from(err: queries::HistoryError) -> Self {
        Self::History(err)
    }
}

impl IntoResponse for DatasetApiError {
    fn into_response(self) -> Response {
        match self {
            DatasetApiError::Multipart(message) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", message);
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            }

            DatasetApiError::Upload(UploadDatasetError::Filename(_))
            | DatasetApiError::Upload(UploadDatasetError::ContentRequired)
            | DatasetApiError::Upload(UploadDatasetError::Ingest(_)) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            }
            DatasetApiError::Upload(UploadDatasetError::Database(_))
            | DatasetApiError::History(queries::HistoryError::Database(_))
            | DatasetApiError::Delete(DeleteDatasetError::Database(_)) => {
                tracing::error!("Database error: {}", self);
                let error = ErrorResponse::new("DATABASE_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            }
            DatasetApiError::Upload(UploadDatasetError::Storage(_))
            | DatasetApiError::Delete(DeleteDatasetError::Storage(_)) => {
                tracing::error!("Storage error: {}", self);
                let error = ErrorResponse::new("STORAGE_ERROR", "A storage error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            }

            DatasetApiError::Delete(DeleteDatasetError::NotFound(id)) => {
                let error = ErrorResponse::new("NOT_FOUND", format!("Dataset {id} not found"));
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            }
        }
    }
}

impl std::fmt::Display for DatasetApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Multipart(message) => write!(f, "{}", message),
            Self::Upload(e) => write!(f, "{}", e),
            Self::Delete(e) => write!(f, "{}", e),
            Self::History(e) => write!(f, "{}", e),
        }
    }
}
