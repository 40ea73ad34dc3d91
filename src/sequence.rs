/// Window length the bundled model was trained on.
pub const DEFAULT_WINDOW_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("insufficient history: need {required} observations, got {available}")]
pub struct InsufficientHistory {
    pub required: usize,
    pub available: usize,
}

/// Single-batch, single-feature model input of shape `(1, window, 1)`.
/// Values are stored flat in chronological order, most recent last.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceWindow {
    values: Vec<f32>,
}

impl InferenceWindow {
    pub fn shape(&self) -> [usize; 3] {
        [1, self.values.len(), 1]
    }

    pub fn window_size(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Take the trailing `window_size` normalized values.
pub fn build_window(
    normalized: &[f64],
    window_size: usize,
) -> Result<InferenceWindow, InsufficientHistory> {
    if normalized.len() < window_size {
        return Err(InsufficientHistory {
            required: window_size,
            available: normalized.len(),
        });
    }
    let start = normalized.len() - window_size;
    Ok(InferenceWindow {
        values: normalized[start..].iter().map(|&v| v as f32).collect(),
    })
}

/// Trailing `n` items of a slice, or all of it if shorter.
pub fn trailing<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}
