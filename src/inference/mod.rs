use std::path::Path;
use std::sync::Arc;

use crate::error::{AppError, InferenceError};
use crate::sequence::InferenceWindow;

pub mod linear;
#[cfg(feature = "onnx")]
pub mod onnx;

pub use linear::LinearGateway;
#[cfg(feature = "onnx")]
pub use onnx::OnnxGateway;

/// The trained model, seen as an opaque `(1, W, 1) -> (1, 1)` function.
///
/// Implementations are loaded once at startup and shared read-only across
/// requests, so `predict` takes `&self`.
pub trait InferenceGateway: Send + Sync {
    fn name(&self) -> &str;

    /// Number of time steps the model expects.
    fn window_size(&self) -> usize;

    /// Run the model. Returns the output tensor flattened.
    fn predict(&self, window: &InferenceWindow) -> Result<Vec<f32>, InferenceError>;
}

pub type SharedGateway = Arc<dyn InferenceGateway>;

/// Load a model artifact, picking the backend from the file extension.
pub fn load_gateway(path: &Path, window_size: usize) -> Result<SharedGateway, AppError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "json" => Ok(Arc::new(LinearGateway::load(path, window_size)?)),
        #[cfg(feature = "onnx")]
        "onnx" => Ok(Arc::new(OnnxGateway::load(path, window_size)?)),
        #[cfg(not(feature = "onnx"))]
        "onnx" => Err(AppError::UnsupportedModel(format!(
            "{} needs the `onnx` feature",
            path.display()
        ))),
        _ => Err(AppError::UnsupportedModel(format!(
            "{}: expected a .json or .onnx file",
            path.display()
        ))),
    }
}
