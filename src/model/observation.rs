use chrono::NaiveDate;
use serde::Serialize;

/// One daily price for the selected column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceObservation {
    pub date: NaiveDate,
    pub price: f64,
}

/// One daily bar as delivered by the history provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub close: Option<f64>,
    pub adj_close: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceColumn {
    AdjClose,
    Close,
}

impl PriceColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdjClose => "adj_close",
            Self::Close => "close",
        }
    }
}

impl std::fmt::Display for PriceColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw provider output for one ticker, oldest bar first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceHistory {
    pub bars: Vec<DailyBar>,
    /// Whether the provider delivered an adjusted-close series at all.
    pub has_adj_close: bool,
}

impl PriceHistory {
    pub fn new(mut bars: Vec<DailyBar>, has_adj_close: bool) -> Self {
        bars.sort_by_key(|b| b.date);
        Self {
            bars,
            has_adj_close,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Adjusted close when the provider supplies it, else close.
    pub fn preferred_column(&self) -> PriceColumn {
        if self.has_adj_close {
            PriceColumn::AdjClose
        } else {
            PriceColumn::Close
        }
    }

    /// Project the history onto a single column. Bars lacking a finite,
    /// non-negative value for that column are dropped; the other column is
    /// never used as a substitute.
    pub fn select(&self, column: PriceColumn) -> Vec<PriceObservation> {
        self.bars
            .iter()
            .filter_map(|bar| {
                let value = match column {
                    PriceColumn::AdjClose => bar.adj_close,
                    PriceColumn::Close => bar.close,
                }?;
                (value.is_finite() && value >= 0.0).then_some(PriceObservation {
                    date: bar.date,
                    price: value,
                })
            })
            .collect()
    }
}

/// Chart point in the response payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    /// ISO calendar date, `YYYY-MM-DD`.
    pub name: String,
    pub price: f64,
}

impl From<&PriceObservation> for HistoryPoint {
    fn from(obs: &PriceObservation) -> Self {
        Self {
            name: obs.date.format("%Y-%m-%d").to_string(),
            price: obs.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub ticker: String,
    pub prediction: f64,
    pub recent_history: Vec<HistoryPoint>,
}
