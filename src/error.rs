//! Error types for the proxy
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Upstream Error Enum ==
/// Failure of a single outbound call to the price API.
///
/// Variants are kept apart for diagnostics only; clients always see the
/// same generic 500 response.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// No response within the configured bound
    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),

    /// Upstream answered with a non-2xx status
    #[error("upstream responded with status {0}")]
    Status(u16),

    /// Connection, TLS or protocol failure
    #[error("upstream request failed: {0}")]
    Transport(String),

    /// Body was not JSON or not the expected shape
    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

// == Proxy Error Enum ==
/// Error returned by request handlers.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Missing or empty required query parameter
    #[error("{0}")]
    BadRequest(String),

    /// Upstream fetch failed; `context` is the only client-visible text
    #[error("{context}")]
    Upstream {
        context: &'static str,
        #[source]
        source: UpstreamError,
    },
}

impl ProxyError {
    pub fn missing_params() -> Self {
        ProxyError::BadRequest("Missing required query parameters".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Malformed query strings (e.g. repeated keys) still get the JSON error body.
impl From<QueryRejection> for ProxyError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("rejected query string: {}", rejection.body_text());
        ProxyError::BadRequest("Invalid query parameters".to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.to_string()));
        (self.status(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, ProxyError>;
