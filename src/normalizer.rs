/// Fitted min-max parameters. `scale` is `max - min` of the fitted series.
///
/// A constant series fits with `scale == 0.0`. In that case `transform`
/// maps every value to `0.0` and `inverse_transform` maps every value back
/// to `min`, so decoding always yields the constant price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationParameters {
    pub min: f64,
    pub scale: f64,
}

impl NormalizationParameters {
    /// Fit over the whole series. Returns `None` for an empty series or one
    /// containing a non-finite value.
    pub fn fit(raw: &[f64]) -> Option<Self> {
        let first = *raw.first()?;
        let mut min = first;
        let mut max = first;
        for &v in raw {
            if !v.is_finite() {
                return None;
            }
            min = min.min(v);
            max = max.max(v);
        }
        Some(Self {
            min,
            scale: max - min,
        })
    }

    pub fn is_degenerate(&self) -> bool {
        self.scale == 0.0
    }

    pub fn normalize(&self, raw: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (raw - self.min) / self.scale
    }

    pub fn denormalize(&self, normalized: f64) -> f64 {
        normalized * self.scale + self.min
    }

    pub fn transform(&self, raw: &[f64]) -> Vec<f64> {
        raw.iter().map(|&v| self.normalize(v)).collect()
    }

    pub fn inverse_transform(&self, normalized: &[f64]) -> Vec<f64> {
        normalized.iter().map(|&v| self.denormalize(v)).collect()
    }
}
