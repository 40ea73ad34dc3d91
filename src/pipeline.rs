use std::sync::Arc;

use crate::error::{InferenceError, PredictError};
use crate::inference::SharedGateway;
use crate::model::{HistoryPoint, PredictionResult, PriceHistory, PriceObservation};
use crate::normalizer::NormalizationParameters;
use crate::provider::HistoryProvider;
use crate::sequence::{build_window, trailing, InferenceWindow, DEFAULT_WINDOW_SIZE};

/// Ticker -> next-day price. Holds no per-request state; the gateway is
/// fixed at construction and `None` means inference is disabled.
pub struct PredictionPipeline {
    provider: Arc<dyn HistoryProvider>,
    gateway: Option<SharedGateway>,
    window_size: usize,
}

impl PredictionPipeline {
    pub fn new(provider: Arc<dyn HistoryProvider>, gateway: Option<SharedGateway>) -> Self {
        Self {
            provider,
            gateway,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn model_loaded(&self) -> bool {
        self.gateway.is_some()
    }

    pub fn ensure_model(&self) -> Result<&SharedGateway, PredictError> {
        self.gateway.as_ref().ok_or(PredictError::ModelUnavailable)
    }

    pub async fn predict(&self, ticker: &str) -> Result<PredictionResult, PredictError> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(PredictError::MissingInput);
        }
        let gateway = Arc::clone(self.ensure_model()?);

        let history = self.provider.daily_history(ticker).await?;
        let prepared = prepare(&history, self.window_size)?;

        let window = prepared.window;
        let output = tokio::task::spawn_blocking(move || gateway.predict(&window))
            .await
            .map_err(|e| InferenceError::Runtime(format!("inference task failed: {}", e)))??;

        let result = assemble(ticker, &prepared.series, prepared.params, &output, self.window_size)?;
        tracing::info!(
            ticker,
            column = %history.preferred_column(),
            observations = prepared.series.len(),
            prediction = result.prediction,
            "prediction complete"
        );
        Ok(result)
    }
}

struct Prepared {
    series: Vec<PriceObservation>,
    params: NormalizationParameters,
    window: InferenceWindow,
}

/// Column selection, scaling and windowing. Fails before any model call.
fn prepare(history: &PriceHistory, window_size: usize) -> Result<Prepared, PredictError> {
    if history.is_empty() {
        return Err(PredictError::NoData);
    }
    let series = history.select(history.preferred_column());
    let raw: Vec<f64> = series.iter().map(|o| o.price).collect();

    // Fit over everything retrieved, not just the trailing window.
    let params = NormalizationParameters::fit(&raw).ok_or(PredictError::NoData)?;
    let normalized = params.transform(&raw);
    let window = build_window(&normalized, window_size)?;

    Ok(Prepared {
        series,
        params,
        window,
    })
}

fn assemble(
    ticker: &str,
    series: &[PriceObservation],
    params: NormalizationParameters,
    output: &[f32],
    window_size: usize,
) -> Result<PredictionResult, PredictError> {
    let [scaled] = output else {
        return Err(InferenceError::OutputArity(output.len()).into());
    };
    if !scaled.is_finite() {
        return Err(InferenceError::NonFinite.into());
    }
    let prediction = params.denormalize(f64::from(*scaled));

    Ok(PredictionResult {
        ticker: ticker.to_string(),
        prediction,
        recent_history: trailing(series, window_size)
            .iter()
            .map(HistoryPoint::from)
            .collect(),
    })
}
