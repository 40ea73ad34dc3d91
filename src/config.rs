use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::sequence::DEFAULT_WINDOW_SIZE;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub model: ModelConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub chart_base_url: String,
    pub search_base_url: String,
    #[serde(default = "default_history_range")]
    pub history_range: String,
    #[serde(default = "default_timeout_secs")]
    pub history_timeout_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub search_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub path: PathBuf,
    #[serde(default = "default_window_size")]
    pub window_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Write JSON logs to this file instead of stdout.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

fn default_history_range() -> String {
    "2y".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .with_context(|| format!("invalid server.bind '{}'", self.bind))
    }
}

impl ProviderConfig {
    pub fn history_timeout(&self) -> Duration {
        Duration::from_secs(self.history_timeout_secs)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }
}

impl Config {
    /// Load from `STOCK_FORECAST_CONFIG` or `config/default.toml`, then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = std::env::var("STOCK_FORECAST_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        let mut config = Self::from_file(&path)?;

        if let Ok(bind) = std::env::var("STOCK_FORECAST_BIND") {
            config.server.bind = bind;
        }
        if let Ok(model_path) = std::env::var("STOCK_FORECAST_MODEL_PATH") {
            config.model.path = PathBuf::from(model_path);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&config_str).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.server.bind_addr()?;
        if self.model.window_size == 0 {
            bail!("model.window_size must be > 0");
        }
        if self.provider.history_timeout_secs == 0 {
            bail!("provider.history_timeout_secs must be > 0");
        }
        if self.provider.search_timeout_secs == 0 {
            bail!("provider.search_timeout_secs must be > 0");
        }
        if self.provider.history_range.trim().is_empty() {
            bail!("provider.history_range must not be empty");
        }
        Ok(())
    }
}
