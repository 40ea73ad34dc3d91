use std::sync::Arc;

use anyhow::{Context, Result};

use stock_forecast::config::Config;
use stock_forecast::inference::load_gateway;
use stock_forecast::logging;
use stock_forecast::pipeline::PredictionPipeline;
use stock_forecast::server::{router, AppState};
use stock_forecast::yahoo::YahooRestClient;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Make sure config/default.toml exists or set STOCK_FORECAST_CONFIG");
            std::process::exit(1);
        }
    };

    logging::init(&config.logging)?;

    tracing::info!(
        bind = %config.server.bind,
        model_path = %config.model.path.display(),
        window_size = config.model.window_size,
        "Starting stock-forecast"
    );

    // A model that fails to load leaves the service up with inference disabled.
    let gateway = match load_gateway(&config.model.path, config.model.window_size) {
        Ok(gw) => {
            tracing::info!(backend = gw.name(), window_size = gw.window_size(), "Model loaded");
            Some(gw)
        }
        Err(e) => {
            tracing::error!(error = %e, path = %config.model.path.display(), "Failed to load model");
            None
        }
    };

    let yahoo = Arc::new(YahooRestClient::new(&config.provider)?);
    let pipeline = PredictionPipeline::new(yahoo.clone(), gateway)
        .with_window_size(config.model.window_size);
    let state = AppState {
        pipeline: Arc::new(pipeline),
        search: yahoo,
    };

    let addr = config.server.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Ctrl+C received");
        })
        .await
        .context("server error")?;

    tracing::info!("Shutdown complete");
    Ok(())
}
