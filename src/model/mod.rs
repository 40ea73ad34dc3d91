pub mod observation;

pub use observation::{
    DailyBar, HistoryPoint, PredictionResult, PriceColumn, PriceHistory, PriceObservation,
};
