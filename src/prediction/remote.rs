//! Remote predictor: posts the form to an HTTP scoring endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use super::model::{PredictionResult, YieldPrediction};
use super::Predictor;
use crate::error::{ConfigError, PredictionError};
use crate::wizard::form::FormData;

/// Message used when a transport failure carries no text of its own.
const CONNECT_FALLBACK: &str = "Failed to connect to prediction server";

/// Request body expected by the scoring service.
///
/// Absent slots are sent as empty strings and zeros.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    #[serde(rename = "District_Name")]
    pub district_name: String,
    #[serde(rename = "Nitrogen")]
    pub nitrogen: f64,
    #[serde(rename = "Phosphorus")]
    pub phosphorus: f64,
    #[serde(rename = "Potassium")]
    pub potassium: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
    #[serde(rename = "Rainfall")]
    pub rainfall: f64,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "Soil_color")]
    pub soil_color: String,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Crop")]
    pub crop: String,
    #[serde(rename = "Fertilizer")]
    pub fertilizer: String,
}

impl From<&FormData> for PredictionRequest {
    fn from(form: &FormData) -> Self {
        let soil = form.soil_data.clone().unwrap_or_default();
        let season = form.season_month.clone().unwrap_or_default();
        Self {
            district_name: form
                .location
                .as_ref()
                .map(|l| l.district.clone())
                .unwrap_or_default(),
            nitrogen: soil.nitrogen,
            phosphorus: soil.phosphorus,
            potassium: soil.potassium,
            ph: soil.ph,
            rainfall: form.rainfall.as_ref().map(|r| r.rainfall).unwrap_or(0.0),
            temperature: form.avg_temperature(),
            soil_color: soil.soil_color,
            season: season.season,
            month: season.month,
            crop: form.crop.as_ref().map(|c| c.crop.clone()).unwrap_or_default(),
            fertilizer: form
                .fertilizer
                .as_ref()
                .map(|f| f.fertilizer_type.clone())
                .unwrap_or_default(),
        }
    }
}

/// Predictor backed by a remote HTTP service.
pub struct RemotePredictor {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl RemotePredictor {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, err: reqwest::Error) -> PredictionError {
        if err.is_timeout() {
            return PredictionError::Timeout(self.timeout);
        }
        let message = err.to_string();
        if message.trim().is_empty() {
            PredictionError::Transport(CONNECT_FALLBACK.to_string())
        } else {
            PredictionError::Transport(message)
        }
    }
}

#[async_trait]
impl Predictor for RemotePredictor {
    fn name(&self) -> &str {
        "remote"
    }

    async fn submit(&self, form: &FormData) -> Result<PredictionResult, PredictionError> {
        let request = PredictionRequest::from(form);
        debug!(
            endpoint = %self.endpoint,
            district = %request.district_name,
            temperature = request.temperature,
            "Sending prediction request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Prediction endpoint rejected request");
            return Err(PredictionError::RemoteRejection {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let prediction: YieldPrediction = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Prediction response did not match expected shape");
            PredictionError::MalformedResponse(e.to_string())
        })?;

        Ok(PredictionResult::Remote(prediction))
    }
}
