//! Yield prediction wizard.
//!
//! The wizard walks the user through six input steps, accumulating a
//! [`FormData`] record, submits it to a [`crate::prediction::Predictor`] and
//! shows the result. From the results screen any slot can be edited, which
//! replaces the slot and re-runs the prediction.

pub mod editor;
pub mod form;
pub mod machine;
pub mod manager;
pub mod routes;
pub mod state;
pub mod validate;

pub use editor::EditDialog;
pub use form::{EditField, FormData, StepOutput};
pub use machine::{Advance, Wizard};
pub use manager::{WizardManager, WizardSnapshot};
pub use routes::{WizardRouteState, wizard_routes};
pub use state::{WizardState, WizardStep};
pub use validate::validate;

#[cfg(test)]
pub(crate) mod fixtures {
    use super::form::{
        CropData, FertilizerData, LocationData, RainfallData, SeasonMonthData, SoilData,
        StepOutput,
    };
    use super::machine::Wizard;
    use super::state::WizardStep;

    /// A valid input for every step, in wizard order.
    pub(crate) fn canonical_inputs() -> Vec<(WizardStep, StepOutput)> {
        vec![
            (
                WizardStep::Location,
                StepOutput::Location(LocationData {
                    district: "Satara".to_string(),
                    taluka: "Karad".to_string(),
                }),
            ),
            (
                WizardStep::Soil,
                StepOutput::Soil(SoilData {
                    soil_color: "Black".to_string(),
                    nitrogen: 150.0,
                    phosphorus: 60.0,
                    potassium: 220.0,
                    ph: 7.2,
                }),
            ),
            (
                WizardStep::Fertilizer,
                StepOutput::Fertilizer(FertilizerData {
                    fertilizer_type: "DAP (18-46-0)".to_string(),
                }),
            ),
            (
                WizardStep::Rainfall,
                StepOutput::Rainfall(RainfallData {
                    rainfall: 900.0,
                    min_temp: 20.0,
                    max_temp: 30.0,
                }),
            ),
            (
                WizardStep::Season,
                StepOutput::SeasonMonth(SeasonMonthData {
                    season: "Rabi".to_string(),
                    month: "November".to_string(),
                }),
            ),
            (
                WizardStep::Crop,
                StepOutput::Crop(CropData {
                    crop: "Wheat".to_string(),
                }),
            ),
        ]
    }

    /// A wizard that has completed every step and is waiting on its
    /// first prediction.
    pub(crate) fn completed_wizard() -> Wizard {
        let mut wizard = Wizard::new();
        wizard.start().unwrap();
        for (step, output) in canonical_inputs() {
            wizard.advance(step, output).unwrap();
        }
        wizard
    }
}
