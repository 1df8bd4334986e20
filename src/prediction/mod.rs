//! Yield prediction.
//!
//! Two interchangeable strategies sit behind the [`Predictor`] trait:
//! - **Remote**: posts the form to an HTTP scoring service and returns its
//!   `predicted_yield`.
//! - **Local**: computes a composite suitability score offline.
//!
//! The strategy is chosen once per deployment via [`PredictorConfig`].

mod local;
mod model;
mod remote;

pub use local::LocalHeuristicPredictor;
pub use model::{
    AlternativeCrop, FactorScores, HeuristicScore, InputSummary, PredictionResult, YieldPrediction,
};
pub use remote::{PredictionRequest, RemotePredictor};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ConfigError, PredictionError};
use crate::wizard::form::FormData;

/// A strategy that turns a completed form into a prediction.
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    /// Score `form`. Implementations issue at most one outbound request.
    async fn submit(&self, form: &FormData) -> Result<PredictionResult, PredictionError>;
}

/// Supported prediction backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictorBackend {
    Remote,
    Local,
}

impl std::str::FromStr for PredictorBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "local" => Ok(Self::Local),
            other => Err(format!("expected 'remote' or 'local', got '{other}'")),
        }
    }
}

/// Configuration for creating a predictor.
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub backend: PredictorBackend,
    pub endpoint: String,
    pub timeout: Duration,
}

/// Create a predictor from configuration.
pub fn create_predictor(config: &PredictorConfig) -> Result<Arc<dyn Predictor>, ConfigError> {
    match config.backend {
        PredictorBackend::Remote => {
            let predictor = RemotePredictor::new(&config.endpoint, config.timeout)?;
            tracing::info!(endpoint = %predictor.endpoint(), "Using remote predictor");
            Ok(Arc::new(predictor))
        }
        PredictorBackend::Local => {
            tracing::info!("Using local heuristic predictor");
            Ok(Arc::new(LocalHeuristicPredictor::new()))
        }
    }
}
