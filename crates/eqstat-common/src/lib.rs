//! Eqstat Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging, and error handling for the eqstat workspace.
//!
//! # Overview
//!
//! This crate provides functionality used across all eqstat workspace members:
//!
//! - **Error Handling**: the shared [`EqstatError`] and result alias
//! - **Logging**: tracing-subscriber initialization for server and CLI
//! - **Types**: API payload types exchanged between server and client

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{EqstatError, Result};
