//! Prediction result shapes.

use serde::{Deserialize, Serialize};

/// Outcome of a successful submission.
///
/// A deployment produces exactly one of the two shapes, depending on which
/// predictor it is configured with. They are never mixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionResult {
    /// Yield returned by the remote model.
    Remote(YieldPrediction),
    /// Composite score computed offline.
    Heuristic(HeuristicScore),
}

impl PredictionResult {
    /// Headline number for logging: kg/ha for remote, 0-100 score for heuristic.
    pub fn headline(&self) -> f64 {
        match self {
            Self::Remote(p) => p.predicted_yield,
            Self::Heuristic(s) => f64::from(s.main_score),
        }
    }
}

/// Remote prediction response body, `{ "predicted_yield": number }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldPrediction {
    /// Predicted yield in kg/hectare, passed through unmodified.
    pub predicted_yield: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeuristicScore {
    pub main_score: u32,
    pub confidence: u32,
    pub location: String,
    pub factor_scores: FactorScores,
    pub input_summary: InputSummary,
    pub alternatives: Vec<AlternativeCrop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorScores {
    pub soil_quality: f64,
    pub nutrient_balance: f64,
    pub weather_conditions: f64,
    pub fertilizer_efficiency: f64,
}

/// Echo of the inputs the score was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSummary {
    pub location: String,
    pub soil_color: String,
    pub crop: String,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
    pub rainfall: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub fertilizer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeCrop {
    pub name: String,
    pub suitability: u32,
    pub benefit: String,
}
