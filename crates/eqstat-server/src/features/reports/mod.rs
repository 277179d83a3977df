//! Report feature: one-page PDF summary per stored dataset.

pub mod queries;
pub mod routes;

pub use routes::reports_routes;
