//! Upstream data seams. The pipeline and HTTP layer only see these traits,
//! so tests can swap in fixed data.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProviderError;
use crate::model::PriceHistory;

#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Daily history over the provider's configured lookback, oldest first.
    /// An unknown ticker yields an empty history rather than an error.
    async fn daily_history(&self, ticker: &str) -> Result<PriceHistory, ProviderError>;
}

#[async_trait]
pub trait SymbolSearch: Send + Sync {
    /// Equity quotes matching `query`, passed through as raw JSON objects.
    async fn search_equities(&self, query: &str) -> Result<Vec<Value>, ProviderError>;
}
