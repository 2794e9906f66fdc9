//! Cache Keys
//!
//! Pure key derivation. Callers pass parameters that are already normalized
//! (see `models::requests`), so logically equal requests share one key.

/// Single global key for the coin catalog.
pub const COIN_LIST_KEY: &str = "coinlist";

pub fn prices_key(ids: &[String], vs_currencies: &[String]) -> String {
    format!("prices:{}:{}", ids.join(","), vs_currencies.join(","))
}

pub fn history_key(id: &str, days: &str) -> String {
    format!("history:{}:{}", id, days)
}
