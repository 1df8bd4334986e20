//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::prediction::{PredictorBackend, PredictorConfig};

/// Environment variable names.
pub mod env {
    pub const PREDICTOR: &str = "AGRI_YIELD_PREDICTOR";
    pub const PREDICT_URL: &str = "AGRI_YIELD_PREDICT_URL";
    pub const CHAT_URL: &str = "AGRI_YIELD_CHAT_URL";
    pub const REQUEST_TIMEOUT_SECS: &str = "AGRI_YIELD_REQUEST_TIMEOUT_SECS";
    pub const PORT: &str = "AGRI_YIELD_PORT";
    pub const DATA_PATH: &str = "AGRI_YIELD_DATA_PATH";
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Which prediction strategy to use.
    pub predictor: PredictorBackend,
    /// Scoring endpoint for the remote predictor.
    pub predict_url: String,
    /// Chat assistant endpoint.
    pub chat_url: String,
    /// Applies to every outbound HTTP request.
    pub request_timeout: Duration,
    /// HTTP listen port.
    pub port: u16,
    /// JSON file backing the key-value store.
    pub data_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            predictor: PredictorBackend::Remote,
            predict_url: "http://127.0.0.1:8000/predict".to_string(),
            chat_url: "http://127.0.0.1:8000/chat".to_string(),
            request_timeout: Duration::from_secs(30),
            port: 8080,
            data_path: PathBuf::from("./data/agri-yield.json"),
        }
    }
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from `lookup`, falling back to defaults for
    /// unset or blank variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(env::PREDICTOR) {
            config.predictor = raw.parse().map_err(|message| ConfigError::InvalidValue {
                key: env::PREDICTOR.to_string(),
                message,
            })?;
        }
        if let Some(url) = get(env::PREDICT_URL) {
            config.predict_url = url;
        }
        if let Some(url) = get(env::CHAT_URL) {
            config.chat_url = url;
        }
        if let Some(raw) = get(env::REQUEST_TIMEOUT_SECS) {
            let secs: u64 = parse_number(env::REQUEST_TIMEOUT_SECS, &raw)?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: env::REQUEST_TIMEOUT_SECS.to_string(),
                    message: "must be at least 1 second".to_string(),
                });
            }
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = get(env::PORT) {
            config.port = parse_number(env::PORT, &raw)?;
        }
        if let Some(path) = get(env::DATA_PATH) {
            config.data_path = PathBuf::from(path);
        }

        Ok(config)
    }

    pub fn predictor_config(&self) -> PredictorConfig {
        PredictorConfig {
            backend: self.predictor,
            endpoint: self.predict_url.clone(),
            timeout: self.request_timeout,
        }
    }
}

fn parse_number<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("'{raw}': {e}"),
    })
}
