//! Form data accumulator and per-slot payloads.

use serde::{Deserialize, Serialize};

use crate::error::WizardError;

/// Location slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    pub district: String,
    #[serde(default)]
    pub taluka: String,
}

/// Soil slot. Nutrients are in ppm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilData {
    pub soil_color: String,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
}

/// Fertilizer slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FertilizerData {
    pub fertilizer_type: String,
}

/// Rainfall slot: annual rainfall in mm, temperatures in °C.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RainfallData {
    pub rainfall: f64,
    pub min_temp: f64,
    pub max_temp: f64,
}

impl RainfallData {
    pub fn avg_temperature(&self) -> f64 {
        (self.min_temp + self.max_temp) / 2.0
    }
}

/// Season and month slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonMonthData {
    pub season: String,
    pub month: String,
}

/// Crop slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CropData {
    pub crop: String,
}

/// The editable fields of a completed form, one per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditField {
    Location,
    Soil,
    Fertilizer,
    Rainfall,
    SeasonMonth,
    Crop,
}

impl EditField {
    pub const ALL: [EditField; 6] = [
        Self::Location,
        Self::Soil,
        Self::Fertilizer,
        Self::Rainfall,
        Self::SeasonMonth,
        Self::Crop,
    ];

    /// Name of the `FormData` slot this field writes to.
    pub fn slot_name(&self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Soil => "soilData",
            Self::Fertilizer => "fertilizer",
            Self::Rainfall => "rainfall",
            Self::SeasonMonth => "seasonMonth",
            Self::Crop => "crop",
        }
    }
}

impl std::fmt::Display for EditField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Location => "location",
            Self::Soil => "soil",
            Self::Fertilizer => "fertilizer",
            Self::Rainfall => "rainfall",
            Self::SeasonMonth => "seasonMonth",
            Self::Crop => "crop",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for EditField {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.to_string() == s)
            .ok_or_else(|| WizardError::UnknownStep(s.to_string()))
    }
}

/// Data collected by one step (or one edit dialog), tagged with its slot.
///
/// JSON shape: `{"field": "soil", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "data", rename_all = "camelCase")]
pub enum StepOutput {
    Location(LocationData),
    Soil(SoilData),
    Fertilizer(FertilizerData),
    Rainfall(RainfallData),
    SeasonMonth(SeasonMonthData),
    Crop(CropData),
}

impl StepOutput {
    /// The slot this payload belongs to.
    pub fn field(&self) -> EditField {
        match self {
            Self::Location(_) => EditField::Location,
            Self::Soil(_) => EditField::Soil,
            Self::Fertilizer(_) => EditField::Fertilizer,
            Self::Rainfall(_) => EditField::Rainfall,
            Self::SeasonMonth(_) => EditField::SeasonMonth,
            Self::Crop(_) => EditField::Crop,
        }
    }

    /// Zero-valued payload, used to seed an edit dialog for an absent slot.
    pub fn empty(field: EditField) -> Self {
        match field {
            EditField::Location => Self::Location(LocationData::default()),
            EditField::Soil => Self::Soil(SoilData::default()),
            EditField::Fertilizer => Self::Fertilizer(FertilizerData::default()),
            EditField::Rainfall => Self::Rainfall(RainfallData::default()),
            EditField::SeasonMonth => Self::SeasonMonth(SeasonMonthData::default()),
            EditField::Crop => Self::Crop(CropData::default()),
        }
    }

    /// The initial values a step's input form starts from.
    pub fn form_default(field: EditField) -> Self {
        match field {
            EditField::Soil => Self::Soil(SoilData {
                soil_color: "Loam".to_string(),
                nitrogen: 130.0,
                phosphorus: 45.0,
                potassium: 180.0,
                ph: 6.8,
            }),
            EditField::Rainfall => Self::Rainfall(RainfallData {
                rainfall: 1150.0,
                min_temp: 15.0,
                max_temp: 30.0,
            }),
            other => Self::empty(other),
        }
    }
}

/// The accumulated record of everything the user has entered.
///
/// Every slot is replaced whole; there are no partial updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_data: Option<SoilData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertilizer: Option<FertilizerData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rainfall: Option<RainfallData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_month: Option<SeasonMonthData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropData>,
}

impl FormData {
    /// Return a new version of the record with `output`'s slot replaced.
    pub fn with(&self, output: StepOutput) -> FormData {
        let mut next = self.clone();
        match output {
            StepOutput::Location(data) => next.location = Some(data),
            StepOutput::Soil(data) => next.soil_data = Some(data),
            StepOutput::Fertilizer(data) => next.fertilizer = Some(data),
            StepOutput::Rainfall(data) => next.rainfall = Some(data),
            StepOutput::SeasonMonth(data) => next.season_month = Some(data),
            StepOutput::Crop(data) => next.crop = Some(data),
        }
        next
    }

    /// Current contents of a slot, if it has been filled.
    pub fn slot(&self, field: EditField) -> Option<StepOutput> {
        match field {
            EditField::Location => self.location.clone().map(StepOutput::Location),
            EditField::Soil => self.soil_data.clone().map(StepOutput::Soil),
            EditField::Fertilizer => self.fertilizer.clone().map(StepOutput::Fertilizer),
            EditField::Rainfall => self.rainfall.clone().map(StepOutput::Rainfall),
            EditField::SeasonMonth => self.season_month.clone().map(StepOutput::SeasonMonth),
            EditField::Crop => self.crop.clone().map(StepOutput::Crop),
        }
    }

    /// Whether every slot has been filled.
    pub fn is_complete(&self) -> bool {
        EditField::ALL.iter().all(|f| self.slot(*f).is_some())
    }

    /// Mean of min and max temperature, or 0 when the rainfall slot is absent.
    pub fn avg_temperature(&self) -> f64 {
        self.rainfall
            .as_ref()
            .map(RainfallData::avg_temperature)
            .unwrap_or(0.0)
    }
}

/// Choice lists offered by the input forms.
pub mod options {
    pub const SOIL_COLORS: &[&str] = &["Black", "Brown", "Red", "Sandy", "Clay", "Loam"];

    pub const FERTILIZERS: &[&str] = &[
        "NPK (20-20-20)",
        "Urea (46-0-0)",
        "DAP (18-46-0)",
        "Potash (0-0-60)",
        "Complex (12-32-16)",
        "Organic Compost",
    ];

    pub const SEASONS: &[&str] = &["Kharif", "Rabi", "Zaid"];

    pub const MONTHS: &[&str] = &[
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];

    pub const CROPS: &[&str] = &[
        "Rice",
        "Wheat",
        "Corn",
        "Cotton",
        "Sugarcane",
        "Soybean",
        "Potato",
        "Tomato",
    ];
}
