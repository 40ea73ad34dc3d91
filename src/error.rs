use thiserror::Error;

use crate::sequence::InsufficientHistory;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("model load error: {0}")]
    ModelLoad(String),

    #[error("unsupported model artifact: {0}")]
    UnsupportedModel(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures talking to the history or symbol-search upstream.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("unexpected upstream payload: {0}")]
    Payload(String),
}

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("input window has {actual} steps, model expects {expected}")]
    WindowMismatch { expected: usize, actual: usize },

    #[error("expected a single output value, got {0}")]
    OutputArity(usize),

    #[error("model produced a non-finite output")]
    NonFinite,

    #[error("inference runtime error: {0}")]
    Runtime(String),
}

/// Terminal failure of one prediction request.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Ticker is required")]
    MissingInput,

    #[error("No data found for the given ticker")]
    NoData,

    #[error(transparent)]
    InsufficientHistory(#[from] InsufficientHistory),

    #[error("Prediction model not loaded.")]
    ModelUnavailable,

    #[error("history provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("inference failed: {0}")]
    Inference(#[from] InferenceError),
}

impl PredictError {
    /// Short stable label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingInput => "missing_input",
            Self::NoData => "no_data",
            Self::InsufficientHistory(_) => "insufficient_history",
            Self::ModelUnavailable => "model_unavailable",
            Self::Provider(_) => "provider_error",
            Self::Inference(_) => "inference_error",
        }
    }
}
