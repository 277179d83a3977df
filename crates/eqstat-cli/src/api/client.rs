//! HTTP API client for the eqstat server
//!
//! Every API call carries the configured basic-auth credentials; only the
//! health check goes out unauthenticated.

use crate::api::{endpoints, types::ApiResponse};
use crate::error::{CliError, Result};
use eqstat_common::types::{DatasetInfo, UploadReceipt};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

// ============================================================================
// API Client Constants
// ============================================================================

/// Default timeout for API requests in seconds.
/// Can be overridden via EQSTAT_API_TIMEOUT_SECS environment variable.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 60;

/// Default eqstat server URL when not specified via environment variable.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// API client for the eqstat server
pub struct ApiClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String, username: String, password: String) -> Result<Self> {
        let timeout_secs = std::env::var("EQSTAT_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            username,
            password,
        })
    }

    /// Create from environment variables, with an optional URL override.
    ///
    /// - `EQSTAT_SERVER_URL`: server base URL
    /// - `EQSTAT_USER` / `EQSTAT_PASSWORD`: basic-auth credentials (required)
    pub fn from_env(server_url: Option<String>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let base_url = server_url
            .or_else(|| std::env::var("EQSTAT_SERVER_URL").ok())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let username = std::env::var("EQSTAT_USER")
            .map_err(|_| CliError::config("EQSTAT_USER is not set"))?;
        let password = std::env::var("EQSTAT_PASSWORD")
            .map_err(|_| CliError::config("EQSTAT_PASSWORD is not set"))?;

        Self::new(base_url, username, password)
    }

    /// Create a client without credentials, for the open health endpoint.
    pub fn from_env_unauthenticated(server_url: Option<String>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let base_url = server_url
            .or_else(|| std::env::var("EQSTAT_SERVER_URL").ok())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        Self::new(base_url, String::new(), String::new())
    }

    /// Check server health
    pub async fn health_check(&self) -> Result<bool> {
        let url = endpoints::health_url(&self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Upload a CSV file and return the computed summary.
    pub async fn upload(&self, filename: &str, content: Vec<u8>) -> Result<UploadReceipt> {
        let url = endpoints::datasets_url(&self.base_url);

        let part = reqwest::multipart::Part::bytes(content)
            .file_name(filename.to_string())
            .mime_str("text/csv")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .multipart(form)
            .send()
            .await?;

        parse_envelope(response, "Upload").await
    }

    /// Fetch the stored datasets, newest first.
    pub async fn history(&self) -> Result<Vec<DatasetInfo>> {
        let url = endpoints::datasets_url(&self.base_url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        parse_envelope(response, "History").await
    }

    /// Download the PDF report for a dataset.
    pub async fn report(&self, id: i64) -> Result<Vec<u8>> {
        let url = endpoints::report_url(&self.base_url, id);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CliError::DatasetNotFound(id));
        }
        let response = response.error_for_status()?;

        Ok(response.bytes().await?.to_vec())
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Unwrap the `{success, data | error}` envelope into the payload.
async fn parse_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> Result<T> {
    let status = response.status();
    let envelope: ApiResponse<T> = response.json().await?;

    if envelope.success {
        envelope
            .data
            .ok_or_else(|| CliError::api(format!("{context} returned an empty payload")))
    } else {
        let message = envelope
            .error
            .map(|e| e.message)
            .unwrap_or_else(|| format!("{context} failed with status {status}"));
        Err(CliError::api(message))
    }
}
