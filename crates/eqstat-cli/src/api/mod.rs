//! HTTP API layer: client, endpoint builders, and envelope types.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
