//! Upstream Module
//!
//! Outbound calls to the price-data API. Handlers only see the `PriceSource`
//! trait; `CoinGeckoClient` is the production implementation.

mod client;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::UpstreamError;
use crate::models::{HistoryParams, PriceParams};

pub use client::CoinGeckoClient;

// == Price Source Trait ==
/// Performs exactly one outbound call per `fetch`, with no retries.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<Value, UpstreamError>;
}

// == Response Shape ==
/// Minimal structural check applied to upstream bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// JSON object (coin -> currency -> price)
    Object,
    /// JSON object carrying a `prices` array
    MarketChart,
    /// JSON array
    Array,
}

impl ResponseShape {
    pub fn matches(&self, body: &Value) -> bool {
        match self {
            ResponseShape::Object => body.is_object(),
            ResponseShape::MarketChart => body.get("prices").is_some_and(Value::is_array),
            ResponseShape::Array => body.is_array(),
        }
    }
}

// == Upstream Request ==
/// One outbound GET, relative to the client's base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    /// Path segments appended to the base URL, percent-encoded by the client
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub shape: ResponseShape,
}

impl UpstreamRequest {
    /// `GET simple/price?ids=..&vs_currencies=..`
    pub fn simple_price(params: &PriceParams) -> Self {
        Self {
            segments: vec!["simple".into(), "price".into()],
            query: vec![
                ("ids".into(), params.ids.join(",")),
                ("vs_currencies".into(), params.vs_currencies.join(",")),
            ],
            shape: ResponseShape::Object,
        }
    }

    /// `GET coins/{id}/market_chart?vs_currency=usd&days=..`
    pub fn market_chart(params: &HistoryParams) -> Self {
        Self {
            segments: vec!["coins".into(), params.id.clone(), "market_chart".into()],
            query: vec![
                ("vs_currency".into(), "usd".into()),
                ("days".into(), params.days.clone()),
            ],
            shape: ResponseShape::MarketChart,
        }
    }

    /// `GET coins/list`
    pub fn coin_list() -> Self {
        Self {
            segments: vec!["coins".into(), "list".into()],
            query: Vec::new(),
            shape: ResponseShape::Array,
        }
    }

    /// Human-readable path for logs.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }
}
