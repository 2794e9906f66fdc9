//! Configuration Module
//!
//! Handles loading server, cache and upstream settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default CoinGecko v3 base URL
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.coingecko.com/api/v3";

// == TTL Policy ==
/// Per-endpoint time-to-live in seconds, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub prices: u64,
    pub history: u64,
    pub coin_list: u64,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            prices: 300,
            history: 300,
            coin_list: 3600,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Background sweep interval in seconds
    pub cleanup_interval: u64,
    /// Cache lifetime per endpoint
    pub ttl: TtlPolicy,
    /// Price API base URL, path segments are appended to it
    pub upstream_base_url: String,
    /// Bound on every outbound call, in seconds
    pub upstream_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `PRICES_TTL` / `HISTORY_TTL` / `COINLIST_TTL` - TTLs in seconds (default: 300 / 300 / 3600)
    /// - `UPSTREAM_BASE_URL` - Price API base URL (default: CoinGecko v3)
    /// - `UPSTREAM_TIMEOUT` - Outbound call timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            ttl: TtlPolicy {
                prices: env_or("PRICES_TTL", defaults.ttl.prices),
                history: env_or("HISTORY_TTL", defaults.ttl.history),
                coin_list: env_or("COINLIST_TTL", defaults.ttl.coin_list),
            },
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.upstream_base_url),
            upstream_timeout: env_or("UPSTREAM_TIMEOUT", defaults.upstream_timeout),
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            max_entries: 1000,
            cleanup_interval: 60,
            ttl: TtlPolicy::default(),
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_timeout: 10,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
