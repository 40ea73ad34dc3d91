#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use serde_json::Value;

use stock_forecast::error::{InferenceError, ProviderError};
use stock_forecast::inference::InferenceGateway;
use stock_forecast::model::{DailyBar, PriceHistory};
use stock_forecast::provider::{HistoryProvider, SymbolSearch};
use stock_forecast::sequence::InferenceWindow;

pub fn day(i: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .checked_add_days(Days::new(i as u64))
        .unwrap()
}

/// Close-only history, one bar per consecutive day.
pub fn close_history(closes: &[f64]) -> PriceHistory {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| DailyBar {
            date: day(i),
            close: Some(c),
            adj_close: None,
        })
        .collect();
    PriceHistory::new(bars, false)
}

/// History with both columns; adjusted close is `close * factor`.
pub fn adjusted_history(closes: &[f64], factor: f64) -> PriceHistory {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| DailyBar {
            date: day(i),
            close: Some(c),
            adj_close: Some(c * factor),
        })
        .collect();
    PriceHistory::new(bars, true)
}

pub fn wavy_prices(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + ((i * 7) % 11) as f64 - 5.0 + i as f64 * 0.05)
        .collect()
}

pub struct FixedHistory {
    pub history: PriceHistory,
    pub calls: AtomicUsize,
}

impl FixedHistory {
    pub fn new(history: PriceHistory) -> Arc<Self> {
        Arc::new(Self {
            history,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl HistoryProvider for FixedHistory {
    async fn daily_history(&self, _ticker: &str) -> Result<PriceHistory, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.history.clone())
    }
}

pub struct FailingProvider;

#[async_trait]
impl HistoryProvider for FailingProvider {
    async fn daily_history(&self, _ticker: &str) -> Result<PriceHistory, ProviderError> {
        Err(ProviderError::Status {
            status: 429,
            detail: "Too Many Requests".to_string(),
        })
    }
}

#[async_trait]
impl SymbolSearch for FailingProvider {
    async fn search_equities(&self, _query: &str) -> Result<Vec<Value>, ProviderError> {
        Err(ProviderError::Payload("upstream down".to_string()))
    }
}

pub struct FixedSearch {
    pub quotes: Vec<Value>,
}

#[async_trait]
impl SymbolSearch for FixedSearch {
    async fn search_equities(&self, _query: &str) -> Result<Vec<Value>, ProviderError> {
        Ok(self.quotes.clone())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Readout {
    /// Always return this normalized value.
    Constant(f32),
    /// Echo the most recent window value.
    Last,
    /// Return this many copies of 0.5.
    Arity(usize),
}

/// Deterministic gateway that records how often and with what it was called.
pub struct RecordingGateway {
    pub readout: Readout,
    pub window_size: usize,
    pub calls: AtomicUsize,
    pub last_shape: std::sync::Mutex<Option<[usize; 3]>>,
}

impl RecordingGateway {
    pub fn new(readout: Readout, window_size: usize) -> Arc<Self> {
        Arc::new(Self {
            readout,
            window_size,
            calls: AtomicUsize::new(0),
            last_shape: std::sync::Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl InferenceGateway for RecordingGateway {
    fn name(&self) -> &str {
        "recording"
    }

    fn window_size(&self) -> usize {
        self.window_size
    }

    fn predict(&self, window: &InferenceWindow) -> Result<Vec<f32>, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_shape.lock().unwrap() = Some(window.shape());
        Ok(match self.readout {
            Readout::Constant(v) => vec![v],
            Readout::Last => vec![*window.values().last().unwrap()],
            Readout::Arity(n) => vec![0.5; n],
        })
    }
}
