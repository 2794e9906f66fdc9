//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    coin_list_handler, health_handler, history_handler, prices_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/prices` - Spot prices for `ids` in `vs_currencies`
/// - `GET /api/price` - Same as `/api/prices`, kept for older clients
/// - `GET /api/history` - Historical USD series for `id` over `days`
/// - `GET /api/coinlist` - Coin catalog
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/prices", get(prices_handler))
        .route("/api/price", get(prices_handler))
        .route("/api/history", get(history_handler))
        .route("/api/coinlist", get(coin_list_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
