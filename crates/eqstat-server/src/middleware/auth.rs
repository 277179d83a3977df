//! Basic-auth guard for API routes.
//!
//! Every `/api/v1` route sits behind this layer; `/health` does not.
//! Credentials come from configuration only. Comparison goes through SHA-256
//! digests so the check does not short-circuit on the first differing byte.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::api::response::ErrorResponse;
use crate::config::AuthConfig;

/// Rejection carrying the 401 response.
#[derive(Debug)]
pub struct AuthError {
    message: &'static str,
}

impl AuthError {
    fn missing() -> Self {
        Self {
            message: "Authentication required",
        }
    }

    fn invalid() -> Self {
        Self {
            message: "Invalid credentials",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new("UNAUTHORIZED", self.message));
        let mut response = (StatusCode::UNAUTHORIZED, body).into_response();
        response.headers_mut().insert(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static("Basic realm=\"eqstat\""),
        );
        response
    }
}

/// Middleware fn for `axum::middleware::from_fn_with_state`.
pub async fn require_basic_auth(
    State(auth): State<Arc<AuthConfig>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AuthError::missing)?;

    let (username, password) =
        parse_basic_credentials(header_value).ok_or_else(AuthError::missing)?;

    if !digest_eq(&username, &auth.username) || !digest_eq(&password, &auth.password) {
        tracing::warn!(username = %username, "Rejected API request with invalid credentials");
        return Err(AuthError::invalid());
    }

    Ok(next.run(request).await)
}

/// Decode `Basic <base64(user:pass)>` into its parts.
pub fn parse_basic_credentials(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?.trim();
    let decoded = BASE64.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

fn digest_eq(provided: &str, expected: &str) -> bool {
    Sha256::digest(provided.as_bytes()) == Sha256::digest(expected.as_bytes())
}
