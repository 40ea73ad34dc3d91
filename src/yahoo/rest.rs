use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::types::{ChartEnvelope, SearchEnvelope};
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::model::{DailyBar, PriceHistory};
use crate::provider::{HistoryProvider, SymbolSearch};

pub struct YahooRestClient {
    http: reqwest::Client,
    chart_base_url: Url,
    search_base_url: Url,
    history_range: String,
    history_timeout: Duration,
    search_timeout: Duration,
}

impl YahooRestClient {
    pub fn new(cfg: &ProviderConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&cfg.user_agent)?);
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("failed to build Yahoo HTTP client")?;
        Ok(Self {
            http,
            chart_base_url: parse_base_url(&cfg.chart_base_url)?,
            search_base_url: parse_base_url(&cfg.search_base_url)?,
            history_range: cfg.history_range.clone(),
            history_timeout: cfg.history_timeout(),
            search_timeout: cfg.search_timeout(),
        })
    }

    /// Append path segments to a base URL. Each segment is percent-encoded
    /// on its own, so `/`, `?` and `#` inside a ticker stay inside it.
    fn endpoint(base: &Url, segments: &[&str]) -> Url {
        let mut url = base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn compact_error_body(body: &str) -> String {
        let normalized = body.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.len() > 180 {
            let cut = (0..=180)
                .rev()
                .find(|&i| normalized.is_char_boundary(i))
                .unwrap_or(0);
            format!("{}...", &normalized[..cut])
        } else {
            normalized
        }
    }
}

#[async_trait]
impl HistoryProvider for YahooRestClient {
    async fn daily_history(&self, ticker: &str) -> Result<PriceHistory, ProviderError> {
        // Dot segments are dropped by URL normalization and can never be symbols.
        if matches!(ticker, "." | "..") {
            return Ok(PriceHistory::default());
        }
        let endpoint = Self::endpoint(&self.chart_base_url, &["v8", "finance", "chart", ticker]);
        let response = self
            .http
            .get(endpoint)
            .query(&[
                ("range", self.history_range.as_str()),
                ("interval", "1d"),
                ("events", "div,split"),
                ("includeAdjustedClose", "true"),
            ])
            .timeout(self.history_timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            // Unknown tickers come back as 404 with a chart error body.
            if status == StatusCode::NOT_FOUND {
                tracing::info!(ticker, "yahoo chart reports no data");
                return Ok(PriceHistory::default());
            }
            return Err(ProviderError::Status {
                status: status.as_u16(),
                detail: Self::compact_error_body(&body),
            });
        }

        let envelope: ChartEnvelope = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Payload(format!("chart JSON parse failed: {}", e)))?;
        let history = parse_chart(envelope)?;
        tracing::debug!(ticker, bars = history.len(), "fetched daily history");
        Ok(history)
    }
}

#[async_trait]
impl SymbolSearch for YahooRestClient {
    async fn search_equities(&self, query: &str) -> Result<Vec<Value>, ProviderError> {
        let endpoint = Self::endpoint(&self.search_base_url, &["v1", "finance", "search"]);
        let response = self
            .http
            .get(endpoint)
            .query(&[("q", query)])
            .timeout(self.search_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                detail: Self::compact_error_body(&body),
            });
        }

        let envelope: SearchEnvelope = response.json().await?;
        Ok(filter_equities(envelope.quotes))
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("invalid base URL '{}'", raw))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("base URL '{}' cannot carry a path", raw);
    }
    Ok(url)
}

/// Flatten a chart payload into dated bars. Timestamps are shifted by the
/// exchange's UTC offset so each bar lands on its local trading date.
pub fn parse_chart(envelope: ChartEnvelope) -> Result<PriceHistory, ProviderError> {
    let chart = envelope.chart;
    if let Some(err) = chart.error {
        if err.is_not_found() {
            return Ok(PriceHistory::default());
        }
        return Err(ProviderError::Payload(format!(
            "{}: {}",
            err.code, err.description
        )));
    }

    let Some(result) = chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceHistory::default());
    };

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();
    let adj_closes = result
        .indicators
        .adjclose
        .and_then(|a| a.into_iter().next())
        .map(|a| a.adjclose);
    let has_adj_close = adj_closes.is_some();
    let adj_closes = adj_closes.unwrap_or_default();

    let offset = result.meta.gmtoffset;
    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (i, ts) in result.timestamp.iter().enumerate() {
        let Some(dt) = DateTime::from_timestamp(ts.saturating_add(offset), 0) else {
            return Err(ProviderError::Payload(format!("timestamp {} out of range", ts)));
        };
        bars.push(DailyBar {
            date: dt.date_naive(),
            close: closes.get(i).copied().flatten(),
            adj_close: adj_closes.get(i).copied().flatten(),
        });
    }
    Ok(PriceHistory::new(bars, has_adj_close))
}

pub fn filter_equities(quotes: Vec<Value>) -> Vec<Value> {
    quotes
        .into_iter()
        .filter(|q| q.get("quoteType").and_then(Value::as_str) == Some("EQUITY"))
        .collect()
}
