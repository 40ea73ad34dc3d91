pub mod config;
pub mod error;
pub mod inference;
pub mod logging;
pub mod model;
pub mod normalizer;
pub mod pipeline;
pub mod provider;
pub mod sequence;
pub mod server;
pub mod yahoo;
