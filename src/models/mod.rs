//! Request and Response models for the proxy API

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{HistoryParams, HistoryQuery, PriceParams, PriceQuery};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
