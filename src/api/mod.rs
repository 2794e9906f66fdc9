//! API Module
//!
//! HTTP handlers and routing for the proxy.
//!
//! # Endpoints
//! - `GET /api/prices`, `GET /api/price` - Spot prices
//! - `GET /api/history` - Historical price series
//! - `GET /api/coinlist` - Coin catalog
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
