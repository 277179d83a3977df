//! Write operations for the datasets feature.

pub mod delete;
pub mod upload;

pub use delete::{DeleteDatasetCommand, DeleteDatasetError};
pub use upload::{UploadDatasetCommand, UploadDatasetError};
