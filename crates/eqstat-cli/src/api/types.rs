//! API envelope types as parsed by the client.
//!
//! Payloads themselves (`UploadReceipt`, `DatasetInfo`, ...) live in
//! eqstat-common and are shared with the server.

use serde::Deserialize;

/// Response envelope: `{success, data}` or `{success, error}`.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}
