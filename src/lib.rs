//! Coin Proxy - A caching proxy for cryptocurrency price data
//!
//! Serves spot prices, historical series and the coin catalog from a public
//! price API, with a per-endpoint TTL cache in front of every outbound call.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
