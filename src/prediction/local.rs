//! Offline heuristic predictor.

use async_trait::async_trait;

use super::model::{AlternativeCrop, FactorScores, HeuristicScore, InputSummary, PredictionResult};
use super::Predictor;
use crate::error::PredictionError;
use crate::wizard::form::FormData;

const BASE_SCORE: u32 = 55;
const CONFIDENCE: u32 = 90;
const NOT_PROVIDED: &str = "Not provided";

/// Scores a form against fixed agronomic ranges without any network access.
#[derive(Debug, Default)]
pub struct LocalHeuristicPredictor;

impl LocalHeuristicPredictor {
    pub fn new() -> Self {
        Self
    }

    /// Compute the composite score for `form`.
    pub fn score(form: &FormData) -> HeuristicScore {
        let mut score = BASE_SCORE;

        if let Some(soil) = &form.soil_data {
            if matches!(soil.soil_color.as_str(), "Loam" | "Black") {
                score += 10;
            }
            if (100.0..=300.0).contains(&soil.nitrogen) {
                score += 5;
            }
            if (50.0..=150.0).contains(&soil.phosphorus) {
                score += 5;
            }
            if (150.0..=400.0).contains(&soil.potassium) {
                score += 5;
            }
            if (6.0..=8.0).contains(&soil.ph) {
                score += 5;
            }
        }

        if let Some(rain) = &form.rainfall {
            if (500.0..=1500.0).contains(&rain.rainfall) {
                score += 8;
            } else if rain.rainfall > 1500.0 {
                score += 3;
            }
        }

        if form
            .fertilizer
            .as_ref()
            .is_some_and(|f| f.fertilizer_type == "Organic Compost")
        {
            score += 5;
        }

        let location = form
            .location
            .as_ref()
            .map(|l| format!("{}, {}", l.district, l.taluka))
            .unwrap_or_else(|| NOT_PROVIDED.to_string());
        let nitrogen = form.soil_data.as_ref().map(|s| s.nitrogen).unwrap_or(0.0);

        HeuristicScore {
            main_score: score.min(100),
            confidence: CONFIDENCE,
            location: location.clone(),
            factor_scores: FactorScores {
                soil_quality: if form.soil_data.is_some() { 85.0 } else { 70.0 },
                nutrient_balance: (40.0 + nitrogen * 0.1).min(100.0),
                weather_conditions: if form.rainfall.is_some() { 55.0 } else { 30.0 },
                fertilizer_efficiency: 65.0,
            },
            input_summary: summarize(form, location),
            alternatives: alternatives(),
        }
    }
}

fn summarize(form: &FormData, location: String) -> InputSummary {
    fn text(value: Option<&String>) -> String {
        value
            .filter(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| NOT_PROVIDED.to_string())
    }
    let soil = form.soil_data.as_ref();
    let rain = form.rainfall.as_ref();

    InputSummary {
        location,
        soil_color: text(soil.map(|s| &s.soil_color)),
        crop: text(form.crop.as_ref().map(|c| &c.crop)),
        nitrogen: soil.map(|s| s.nitrogen).unwrap_or(0.0),
        phosphorus: soil.map(|s| s.phosphorus).unwrap_or(0.0),
        potassium: soil.map(|s| s.potassium).unwrap_or(0.0),
        ph: soil.map(|s| s.ph).unwrap_or(0.0),
        rainfall: rain.map(|r| r.rainfall).unwrap_or(0.0),
        min_temp: rain.map(|r| r.min_temp).unwrap_or(0.0),
        max_temp: rain.map(|r| r.max_temp).unwrap_or(0.0),
        fertilizer: text(form.fertilizer.as_ref().map(|f| &f.fertilizer_type)),
    }
}

fn alternatives() -> Vec<AlternativeCrop> {
    [
        ("Sorghum (Jowar)", 92, "Tolerant to low rainfall and high soil iron content"),
        ("Pearl Millet (Bajra)", 88, "Excellent drought tolerance and adapts to various soils"),
        ("Finger Millet (Ragi)", 85, "Thrives in marginal lands with minimal water requirements"),
    ]
    .into_iter()
    .map(|(name, suitability, benefit)| AlternativeCrop {
        name: name.to_string(),
        suitability,
        benefit: benefit.to_string(),
    })
    .collect()
}

#[async_trait]
impl Predictor for LocalHeuristicPredictor {
    fn name(&self) -> &str {
        "local"
    }

    async fn submit(&self, form: &FormData) -> Result<PredictionResult, PredictionError> {
        Ok(PredictionResult::Heuristic(Self::score(form)))
    }
}
