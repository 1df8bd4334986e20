//! Per-step input predicates.
//!
//! All checks are pure and total. Numeric comparisons are strict, so a zero
//! nutrient reading is rejected the same way as a missing one, and NaN fails
//! every check.

use super::form::{
    CropData, FertilizerData, LocationData, RainfallData, SeasonMonthData, SoilData, StepOutput,
};
use super::state::WizardStep;

/// Upper bound for annual rainfall, in mm.
pub const MAX_RAINFALL_MM: f64 = 5000.0;

/// Whether `output` is well-formed enough to complete `step`.
///
/// Returns false when the payload belongs to a different step's slot.
pub fn validate(step: WizardStep, output: &StepOutput) -> bool {
    match (step, output) {
        (WizardStep::Location, StepOutput::Location(d)) => location_is_valid(d),
        (WizardStep::Soil, StepOutput::Soil(d)) => soil_is_valid(d),
        (WizardStep::Fertilizer, StepOutput::Fertilizer(d)) => fertilizer_is_valid(d),
        (WizardStep::Rainfall, StepOutput::Rainfall(d)) => rainfall_is_valid(d),
        (WizardStep::Season, StepOutput::SeasonMonth(d)) => season_is_valid(d),
        (WizardStep::Crop, StepOutput::Crop(d)) => crop_is_valid(d),
        _ => false,
    }
}

pub fn location_is_valid(data: &LocationData) -> bool {
    !data.district.trim().is_empty()
}

pub fn soil_is_valid(data: &SoilData) -> bool {
    !data.soil_color.is_empty()
        && data.nitrogen > 0.0
        && data.phosphorus > 0.0
        && data.potassium > 0.0
        && data.ph > 0.0
}

pub fn fertilizer_is_valid(data: &FertilizerData) -> bool {
    !data.fertilizer_type.is_empty()
}

pub fn rainfall_is_valid(data: &RainfallData) -> bool {
    data.rainfall > 0.0
        && data.rainfall <= MAX_RAINFALL_MM
        && data.min_temp >= 0.0
        && data.max_temp > data.min_temp
}

pub fn season_is_valid(data: &SeasonMonthData) -> bool {
    !data.season.is_empty() && !data.month.is_empty()
}

pub fn crop_is_valid(data: &CropData) -> bool {
    !data.crop.is_empty()
}
