//! API Handlers
//!
//! One handler per upstream resource, all sharing the cache-aside
//! read-through in `read_through`.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::cache::{keys, CacheStore, SharedCache};
use crate::config::{Config, TtlPolicy};
use crate::error::{ProxyError, Result, UpstreamError};
use crate::models::{HealthResponse, HistoryQuery, PriceQuery, StatsResponse};
use crate::upstream::{CoinGeckoClient, PriceSource, UpstreamRequest};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide response cache
    pub cache: SharedCache,
    /// Price API used on cache misses
    pub upstream: Arc<dyn PriceSource>,
    /// Per-endpoint TTLs
    pub ttl: TtlPolicy,
}

impl AppState {
    pub fn new(cache: CacheStore<Value>, upstream: Arc<dyn PriceSource>, ttl: TtlPolicy) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            upstream,
            ttl,
        }
    }

    /// Builds the cache and the CoinGecko client from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let upstream =
            CoinGeckoClient::new(&config.upstream_base_url, config.upstream_timeout())?;
        let cache = CacheStore::new(config.max_entries);
        Ok(Self::new(cache, Arc::new(upstream), config.ttl))
    }
}

// == Cache-aside read-through ==
/// Returns the cached value for `key`, or fetches it upstream and caches it
/// for `ttl_secs`. Failures are never cached.
///
/// The cache lock is released before the upstream call, so two concurrent
/// misses on one key may both fetch; the later write wins.
pub async fn read_through(
    state: &AppState,
    key: String,
    ttl_secs: u64,
    request: UpstreamRequest,
) -> std::result::Result<Value, UpstreamError> {
    if let Some(hit) = state.cache.write().await.get(&key) {
        debug!(key = %key, "cache hit");
        return Ok(hit);
    }
    debug!(key = %key, "cache miss, fetching {}", request.path());

    let value = state.upstream.fetch(&request).await?;

    state
        .cache
        .write()
        .await
        .set(key, value.clone(), ttl_secs);

    Ok(value)
}

fn upstream_failure(context: &'static str) -> impl FnOnce(UpstreamError) -> ProxyError {
    move |source| {
        error!("{}: {}", context, source);
        ProxyError::Upstream { context, source }
    }
}

/// Handler for GET /api/prices (and the legacy GET /api/price)
///
/// Passes through `{coin: {currency: price}}` from upstream.
pub async fn prices_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<PriceQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(query) = query?;
    let params = query.validate()?;
    let key = keys::prices_key(&params.ids, &params.vs_currencies);

    read_through(&state, key, state.ttl.prices, UpstreamRequest::simple_price(&params))
        .await
        .map(Json)
        .map_err(upstream_failure("Error fetching price data"))
}

/// Handler for GET /api/history
///
/// Passes through the market chart object with its `prices` array.
pub async fn history_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(query) = query?;
    let params = query.validate()?;
    let key = keys::history_key(&params.id, &params.days);

    read_through(&state, key, state.ttl.history, UpstreamRequest::market_chart(&params))
        .await
        .map(Json)
        .map_err(upstream_failure("Error fetching historical data"))
}

/// Handler for GET /api/coinlist
pub async fn coin_list_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    read_through(
        &state,
        keys::COIN_LIST_KEY.to_string(),
        state.ttl.coin_list,
        UpstreamRequest::coin_list(),
    )
    .await
    .map(Json)
    .map_err(upstream_failure("Error fetching coin list"))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    Json(stats.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct StaticSource {
        calls: AtomicUsize,
        body: Option<Value>,
    }

    #[async_trait]
    impl PriceSource for StaticSource {
        async fn fetch(&self, _request: &UpstreamRequest) -> std::result::Result<Value, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.body
                .clone()
                .ok_or(UpstreamError::Timeout(Duration::from_secs(10)))
        }
    }

    fn state_with(body: Option<Value>) -> (AppState, Arc<StaticSource>) {
        let source = Arc::new(StaticSource {
            calls: AtomicUsize::new(0),
            body,
        });
        let state = AppState::new(CacheStore::new(100), source.clone(), TtlPolicy::default());
        (state, source)
    }

    #[tokio::test]
    async fn test_read_through_caches_success() {
        let (state, source) = state_with(Some(json!({"bitcoin": {"usd": 1.0}})));

        for _ in 0..3 {
            let value = read_through(&state, "k".to_string(), 300, UpstreamRequest::coin_list())
                .await
                .unwrap();
            assert_eq!(value, json!({"bitcoin": {"usd": 1.0}}));
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_read_through_does_not_cache_failure() {
        let (state, source) = state_with(None);

        for _ in 0..2 {
            let result =
                read_through(&state, "k".to_string(), 300, UpstreamRequest::coin_list()).await;
            assert!(matches!(result, Err(UpstreamError::Timeout(_))));
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert!(state.cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_prices_handler_rejects_before_upstream() {
        let (state, source) = state_with(Some(json!({})));

        let query = PriceQuery {
            ids: Some("bitcoin".to_string()),
            vs_currencies: None,
        };
        let result = prices_handler(State(state.clone()), Ok(Query(query))).await;

        assert!(matches!(result, Err(ProxyError::BadRequest(_))));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(state.cache.read().await.stats().misses, 0);
    }

    #[tokio::test]
    async fn test_coin_list_handler_maps_failure() {
        let (state, _) = state_with(None);

        let err = coin_list_handler(State(state)).await.unwrap_err();
        assert_eq!(err.to_string(), "Error fetching coin list");
    }

    #[tokio::test]
    async fn test_long_key_is_cached() {
        let (state, source) = state_with(Some(json!({"ok": true})));
        let key = format!("prices:{}:usd", "x".repeat(4096));

        for _ in 0..2 {
            let value = read_through(&state, key.clone(), 300, UpstreamRequest::coin_list())
                .await
                .unwrap();
            assert_eq!(value, json!({"ok": true}));
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
