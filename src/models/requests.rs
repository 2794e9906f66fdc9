//! Query DTOs for the proxy API
//!
//! Raw query strings are deserialized into optional fields so that a missing
//! parameter yields our own 400 body instead of an extractor rejection.
//! `validate` turns them into normalized parameters.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::{ProxyError, Result};

/// Query for `GET /api/prices`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceQuery {
    /// Comma-separated coin identifiers
    pub ids: Option<String>,
    /// Comma-separated target currencies
    pub vs_currencies: Option<String>,
}

/// Normalized spot price parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceParams {
    pub ids: Vec<String>,
    pub vs_currencies: Vec<String>,
}

impl PriceQuery {
    pub fn validate(&self) -> Result<PriceParams> {
        let ids = normalize_list(self.ids.as_deref());
        let vs_currencies = normalize_list(self.vs_currencies.as_deref());

        if ids.is_empty() || vs_currencies.is_empty() {
            return Err(ProxyError::missing_params());
        }

        Ok(PriceParams { ids, vs_currencies })
    }
}

/// Query for `GET /api/history`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    /// Single coin identifier
    pub id: Option<String>,
    /// Day range, usually an integer
    pub days: Option<String>,
}

/// Normalized history parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryParams {
    pub id: String,
    pub days: String,
}

impl HistoryQuery {
    pub fn validate(&self) -> Result<HistoryParams> {
        let id = normalize_item(self.id.as_deref());
        let days = normalize_days(self.days.as_deref());

        match (id, days) {
            (Some(id), Some(days)) => Ok(HistoryParams { id, days }),
            _ => Err(ProxyError::missing_params()),
        }
    }
}

/// Splits on commas, trims, lowercases, drops blanks, sorts and dedups.
pub fn normalize_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .filter_map(|item| normalize_item(Some(item)))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn normalize_item(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

// Integer day counts are rendered canonically ("030" -> "30"); anything else
// (e.g. "max") passes through lowercased.
fn normalize_days(raw: Option<&str>) -> Option<String> {
    let days = normalize_item(raw)?;
    Some(match days.parse::<u64>() {
        Ok(n) => n.to_string(),
        Err(_) => days,
    })
}
