//! Read operations for the datasets feature.

pub mod history;

pub use history::{HistoryError, HistoryQuery};
