use std::path::Path;
use std::sync::Mutex;

use ndarray::Array3;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;

use super::InferenceGateway;
use crate::error::{AppError, InferenceError};
use crate::sequence::InferenceWindow;

/// ONNX Runtime backed gateway. The session needs exclusive access per run,
/// so it sits behind a mutex; callers still share the gateway read-only.
pub struct OnnxGateway {
    session: Mutex<Session>,
    window_size: usize,
}

impl OnnxGateway {
    pub fn load(path: &Path, window_size: usize) -> Result<Self, AppError> {
        let session = open_session(path)
            .map_err(|e| AppError::ModelLoad(format!("{}: {}", path.display(), e)))?;
        Ok(Self {
            session: Mutex::new(session),
            window_size,
        })
    }
}

fn open_session(path: &Path) -> Result<Session, String> {
    let builder = Session::builder().map_err(|e| e.to_string())?;
    let builder = builder
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| e.to_string())?;
    // Single intra-op thread keeps outputs reproducible.
    let builder = builder.with_intra_threads(1).map_err(|e| e.to_string())?;
    builder.commit_from_file(path).map_err(|e| e.to_string())
}

impl InferenceGateway for OnnxGateway {
    fn name(&self) -> &str {
        "onnx"
    }

    fn window_size(&self) -> usize {
        self.window_size
    }

    fn predict(&self, window: &InferenceWindow) -> Result<Vec<f32>, InferenceError> {
        if window.window_size() != self.window_size {
            return Err(InferenceError::WindowMismatch {
                expected: self.window_size,
                actual: window.window_size(),
            });
        }
        let [batch, steps, features] = window.shape();
        let input = Array3::from_shape_vec((batch, steps, features), window.values().to_vec())
            .map_err(|e| InferenceError::Runtime(e.to_string()))?;
        let tensor = Value::from_array(input).map_err(|e| InferenceError::Runtime(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| InferenceError::Runtime("session lock poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| InferenceError::Runtime(e.to_string()))?;
        let (_, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Runtime(e.to_string()))?;
        Ok(data.to_vec())
    }
}
