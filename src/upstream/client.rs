//! CoinGecko HTTP client
//!
//! Single-attempt, timeout-bounded GETs with error normalization.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use super::{PriceSource, UpstreamRequest};
use crate::error::UpstreamError;

pub struct CoinGeckoClient {
    base_url: Url,
    timeout: Duration,
    client: reqwest::Client,
}

impl CoinGeckoClient {
    /// Builds a client whose every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid upstream base URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("upstream base URL cannot carry a path: {base_url}");
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("coin_proxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build upstream HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            client,
        })
    }

    /// Full URL for a request, without the query string.
    pub fn url_for(&self, request: &UpstreamRequest) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(&request.segments);
        }
        url
    }

    fn classify(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.timeout)
        } else if err.is_decode() {
            UpstreamError::Malformed(err.to_string())
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<Value, UpstreamError> {
        let url = self.url_for(request);
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .query(&request.query)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        if !request.shape.matches(&body) {
            return Err(UpstreamError::Malformed(format!(
                "expected {:?} body from {}",
                request.shape,
                request.path()
            )));
        }

        Ok(body)
    }
}
