//! Application configuration

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::errors::ShipxyError;

pub const DEFAULT_BASE_URL: &str = "http://api.shipxy.com/apicall";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Shipxy API key, sent as `key` on every request
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl AppConfig {
    /// Load from `config/default` (if present) and `SHIPXY_*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config/default")
    }

    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("SHIPXY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ShipxyError> {
        if self.api_key.trim().is_empty() {
            return Err(ShipxyError::InvalidConfig {
                message: "API key cannot be empty".to_string(),
            });
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ShipxyError::InvalidConfig {
                message: format!("Base URL must be http(s): {}", self.base_url),
            });
        }
        Ok(())
    }
}
