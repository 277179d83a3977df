//! Read operations for the reports feature.

pub mod render;

pub use render::{RenderReportError, RenderReportQuery};
