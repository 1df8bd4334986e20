//! Climate insights: maps rainfall and temperature to a climate bucket and
//! a fixed list of field advice.
//!
//! The advice table intentionally covers only some of the twelve buckets.
//! Buckets without an entry (for example `High-Hot`) produce no advice and
//! the insights panel is hidden.

use serde::{Deserialize, Serialize};

use crate::wizard::form::FormData;

/// Annual rainfall band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RainCategory {
    Low,
    Medium,
    High,
}

impl RainCategory {
    pub fn from_rainfall(rainfall: f64) -> Self {
        if rainfall >= 1500.0 {
            Self::High
        } else if rainfall >= 800.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Band of the mean daily temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TempCategory {
    Cool,
    Moderate,
    Warm,
    Hot,
}

impl TempCategory {
    pub fn from_avg(avg_temp: f64) -> Self {
        if avg_temp <= 15.0 {
            Self::Cool
        } else if avg_temp <= 25.0 {
            Self::Moderate
        } else if avg_temp <= 35.0 {
            Self::Warm
        } else {
            Self::Hot
        }
    }
}

impl std::fmt::Display for RainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

impl std::fmt::Display for TempCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// A rain/temperature classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClimateBucket {
    pub rain: RainCategory,
    pub temp: TempCategory,
}

impl ClimateBucket {
    /// Lookup key, e.g. `"High-Cool"`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.rain, self.temp)
    }

    /// Heading shown above the advice, e.g. `"High Rain, Cool Temp"`.
    pub fn title(&self) -> String {
        format!("{} Rain, {} Temp", self.rain, self.temp)
    }
}

/// One piece of advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub category: String,
    pub action: String,
    pub description: String,
}

/// Serializable bundle returned by the insights endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Insights {
    pub bucket: String,
    pub title: String,
    pub rain: RainCategory,
    pub temp: TempCategory,
    pub advice: Vec<Advice>,
}

impl Insights {
    pub fn new(rainfall: f64, min_temp: f64, max_temp: f64) -> Self {
        let (bucket, advice) = derive_insights(rainfall, min_temp, max_temp);
        Self {
            bucket: bucket.key(),
            title: bucket.title(),
            rain: bucket.rain,
            temp: bucket.temp,
            advice,
        }
    }
}

/// Classify the climate and look up its advice.
pub fn derive_insights(rainfall: f64, min_temp: f64, max_temp: f64) -> (ClimateBucket, Vec<Advice>) {
    let bucket = ClimateBucket {
        rain: RainCategory::from_rainfall(rainfall),
        temp: TempCategory::from_avg((min_temp + max_temp) / 2.0),
    };
    let advice = advice_for(bucket)
        .iter()
        .map(|(category, action, description)| Advice {
            category: category.to_string(),
            action: action.to_string(),
            description: description.to_string(),
        })
        .collect();
    (bucket, advice)
}

type AdviceRow = (&'static str, &'static str, &'static str);

const PRECISION_FARMING: &[AdviceRow] = &[
    ("Optimization", "Focus on Precision Fertilization", "Near-ideal conditions maximize nutrient uptake efficiency."),
    ("Monitoring", "Regularly Scout for Pests", "Vigilance is key when conditions are perfect for both crops and threats."),
    ("Future Preparation", "Practice Integrated Pest Management", "Maintain long-term soil and environmental health."),
];

fn advice_for(bucket: ClimateBucket) -> &'static [AdviceRow] {
    use RainCategory::*;
    use TempCategory::*;

    match (bucket.rain, bucket.temp) {
        (Low, Hot) => &[
            ("Water Management", "Implement Drip Irrigation", "Schedule timed irrigation for peak efficiency to handle acute water scarcity."),
            ("Protection", "Apply Sun Protection", "Use shade nets or row covers during peak heat hours (11 am-3 pm) to reduce heat stress."),
            ("Soil Health", "Incorporate Clay/Organic Matter", "Significantly boost the soil's water-holding capacity."),
            ("Government Schemes", "Drought Mitigation Schemes", "Refer to schemes on Drought Mitigation and Micro-Irrigation (e.g., 'Per Drop More Crop')."),
        ],
        (Low, Warm) => &[
            ("Water Management", "Prioritize Water Conservation", "Implement mulching (organic or plastic) to retain existing moisture."),
            ("Protection", "Select Drought-Tolerant Varieties", "Choose varieties specifically suited to handle long dry spells."),
            ("Soil Health", "Deep Cultivation", "Cultivate soil deeply before planting to improve water infiltration when rain occurs."),
        ],
        (Low, Moderate) => &[
            ("Water Management", "Harvest Rainwater", "Build check dams or storage ponds to capture any available rainfall."),
            ("Soil Health", "Use Tillage Practices", "Minimize soil disturbance to preserve capillary moisture (zero or reduced tillage)."),
            ("Government Schemes", "Farm Pond Construction", "Check eligibility for state-level schemes supporting farm pond construction."),
        ],
        (High, Cool) => &[
            ("Drainage", "Improve Field Drainage", "Implement raised beds or sub-surface drainage to remove excess water rapidly."),
            ("Soil Health", "Monitor Soil pH", "Low temperatures often restrict availability of key nutrients like Phosphorus."),
            ("Protection", "Use Crop Covers", "Use low tunnels or temporary covers for cold-sensitive crops to prevent chill injury."),
        ],
        (High, Moderate) => &[
            ("Drainage", "Ensure Soil Aeration", "Use light inter-row cultivation to prevent compaction and improve gas exchange."),
            ("Nutrient Management", "Apply Fertilizers in Split Doses", "Minimize leaching loss due to heavy rainfall."),
            ("Protection", "Fungicide Application", "Apply prophylactic fungicide treatment due to high risk of fungal diseases in humid conditions."),
        ],
        (High, Warm) => &[
            ("Drainage", "Create Emergency Trenches", "Have deep field trenches ready to handle sudden, large volumes of water."),
            ("Weed Control", "Aggressive Weeding", "This climate promotes rapid weed growth and requires frequent, proactive control."),
            ("Protection", "Staking/Support", "Provide support for taller crops to prevent lodging in high winds/rain."),
        ],
        (Medium, Hot) => &[
            ("Water Management", "Irrigate at Dawn/Dusk", "Schedule irrigation during coolest hours to maximize absorption and reduce evaporation."),
            ("Soil Health", "Avoid Deep Tillage", "Preserve residual soil moisture during dry periods."),
            ("Protection", "Monitor for Sunscald", "Light shading or proper leaf canopy management is essential for fruits."),
        ],
        (Medium, Cool) => &[
            ("Nutrient Management", "Focus on Potassium and Phosphorus", "These nutrients are crucial for crop resilience in cooler conditions."),
            ("Drainage", "Ensure Adequate Surface Runoff", "Prevent shallow waterlogging during continuous, moderate rain."),
            ("Future Preparation", "Utilize Crop Rotation", "Maintain ideal soil health during this favorable growing season."),
        ],
        (Medium, Moderate) | (Medium, Warm) => PRECISION_FARMING,
        (Low, Cool) | (High, Hot) => &[],
    }
}

/// Qualitative reading of a single form input, shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Reading {
    VeryLow,
    Low,
    Medium,
    Optimal,
    Good,
    High,
    VeryHigh,
    Acidic,
    Neutral,
    Alkaline,
}

pub fn nitrogen_level(ppm: f64) -> Reading {
    if ppm < 100.0 {
        Reading::Low
    } else if ppm > 200.0 {
        Reading::High
    } else {
        Reading::Medium
    }
}

pub fn phosphorus_level(ppm: f64) -> Reading {
    if ppm < 30.0 {
        Reading::Low
    } else if ppm > 60.0 {
        Reading::High
    } else {
        Reading::Optimal
    }
}

pub fn potassium_level(ppm: f64) -> Reading {
    if ppm < 150.0 {
        Reading::Low
    } else if ppm > 250.0 {
        Reading::High
    } else {
        Reading::Optimal
    }
}

pub fn ph_status(ph: f64) -> Reading {
    if ph < 6.0 {
        Reading::Acidic
    } else if ph > 7.5 {
        Reading::Alkaline
    } else {
        Reading::Neutral
    }
}

pub fn rainfall_level(mm: f64) -> Reading {
    if mm < 300.0 {
        Reading::VeryLow
    } else if mm < 500.0 {
        Reading::Low
    } else if mm <= 1500.0 {
        Reading::Good
    } else if mm <= 2500.0 {
        Reading::High
    } else {
        Reading::VeryHigh
    }
}

/// Readings for whichever numeric inputs the form holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormReadings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nitrogen: Option<Reading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phosphorus: Option<Reading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potassium: Option<Reading>,
    #[serde(rename = "pH", skip_serializing_if = "Option::is_none")]
    pub ph: Option<Reading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rainfall: Option<Reading>,
}

impl FormReadings {
    pub fn from_form(form: &FormData) -> Self {
        let soil = form.soil_data.as_ref();
        Self {
            nitrogen: soil.map(|s| nitrogen_level(s.nitrogen)),
            phosphorus: soil.map(|s| phosphorus_level(s.phosphorus)),
            potassium: soil.map(|s| potassium_level(s.potassium)),
            ph: soil.map(|s| ph_status(s.ph)),
            rainfall: form.rainfall.as_ref().map(|r| rainfall_level(r.rainfall)),
        }
    }
}
