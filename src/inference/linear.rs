use std::path::Path;

use serde::Deserialize;

use super::InferenceGateway;
use crate::error::{AppError, InferenceError};
use crate::sequence::InferenceWindow;

/// Weight artifact for a dense readout over the input window.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearWeights {
    pub weights: Vec<f32>,
    #[serde(default)]
    pub bias: f32,
}

/// `y = bias + sum(w_i * x_i)`, one weight per time step.
#[derive(Debug, Clone)]
pub struct LinearGateway {
    weights: Vec<f32>,
    bias: f32,
}

impl LinearGateway {
    pub fn new(weights: Vec<f32>, bias: f32) -> Self {
        Self { weights, bias }
    }

    pub fn load(path: &Path, window_size: usize) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let parsed: LinearWeights = serde_json::from_str(&raw)?;
        if parsed.weights.len() != window_size {
            return Err(AppError::ModelLoad(format!(
                "{} has {} weights, window size is {}",
                path.display(),
                parsed.weights.len(),
                window_size
            )));
        }
        if !parsed.bias.is_finite() || parsed.weights.iter().any(|w| !w.is_finite()) {
            return Err(AppError::ModelLoad(format!(
                "{} contains non-finite weights",
                path.display()
            )));
        }
        Ok(Self::new(parsed.weights, parsed.bias))
    }
}

impl InferenceGateway for LinearGateway {
    fn name(&self) -> &str {
        "linear"
    }

    fn window_size(&self) -> usize {
        self.weights.len()
    }

    fn predict(&self, window: &InferenceWindow) -> Result<Vec<f32>, InferenceError> {
        if window.window_size() != self.weights.len() {
            return Err(InferenceError::WindowMismatch {
                expected: self.weights.len(),
                actual: window.window_size(),
            });
        }
        let y = self
            .weights
            .iter()
            .zip(window.values())
            .fold(self.bias, |acc, (w, x)| acc + w * x);
        Ok(vec![y])
    }
}
