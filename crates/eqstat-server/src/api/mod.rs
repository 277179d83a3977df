//! API response envelope shared by all routes.

pub mod response;

pub use response::{ApiResponse, ErrorResponse};
