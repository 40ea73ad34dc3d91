pub mod rest;
pub mod types;

pub use rest::{filter_equities, parse_chart, YahooRestClient};
