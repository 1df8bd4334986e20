//! Wizard state machine: which step or phase the user is in.

use serde::{Deserialize, Serialize};

use crate::error::WizardError;
use crate::prediction::PredictionResult;

use super::form::EditField;

/// The input-collecting steps of the wizard.
///
/// Progresses linearly: Landing → Location → Soil → Fertilizer → Rainfall →
/// Season → Crop. Completing Crop submits the form instead of advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[serde(rename = "none")]
    Landing,
    Location,
    Soil,
    Fertilizer,
    Rainfall,
    Season,
    Crop,
}

impl WizardStep {
    pub const ALL: [WizardStep; 7] = [
        Self::Landing,
        Self::Location,
        Self::Soil,
        Self::Fertilizer,
        Self::Rainfall,
        Self::Season,
        Self::Crop,
    ];

    /// Check if moving forward from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: WizardStep) -> bool {
        self.next() == Some(target)
    }

    /// The next step in the fixed order. Crop has none; it submits.
    pub fn next(&self) -> Option<WizardStep> {
        use WizardStep::*;
        match self {
            Landing => Some(Location),
            Location => Some(Soil),
            Soil => Some(Fertilizer),
            Fertilizer => Some(Rainfall),
            Rainfall => Some(Season),
            Season => Some(Crop),
            Crop => None,
        }
    }

    /// The fixed predecessor. Landing has none.
    pub fn previous(&self) -> Option<WizardStep> {
        use WizardStep::*;
        match self {
            Landing => None,
            Location => Some(Landing),
            Soil => Some(Location),
            Fertilizer => Some(Soil),
            Rainfall => Some(Fertilizer),
            Season => Some(Rainfall),
            Crop => Some(Season),
        }
    }

    /// The form slot this step fills.
    pub fn field(&self) -> Option<EditField> {
        use WizardStep::*;
        match self {
            Landing => None,
            Location => Some(EditField::Location),
            Soil => Some(EditField::Soil),
            Fertilizer => Some(EditField::Fertilizer),
            Rainfall => Some(EditField::Rainfall),
            Season => Some(EditField::SeasonMonth),
            Crop => Some(EditField::Crop),
        }
    }

    /// The step that owns `field`.
    pub fn for_field(field: EditField) -> WizardStep {
        match field {
            EditField::Location => Self::Location,
            EditField::Soil => Self::Soil,
            EditField::Fertilizer => Self::Fertilizer,
            EditField::Rainfall => Self::Rainfall,
            EditField::SeasonMonth => Self::Season,
            EditField::Crop => Self::Crop,
        }
    }

    /// Whether completing this step submits the form.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Crop)
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Landing => "none",
            Self::Location => "location",
            Self::Soil => "soil",
            Self::Fertilizer => "fertilizer",
            Self::Rainfall => "rainfall",
            Self::Season => "season",
            Self::Crop => "crop",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for WizardStep {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "landing" {
            return Ok(Self::Landing);
        }
        Self::ALL
            .into_iter()
            .find(|step| step.to_string() == s)
            .ok_or_else(|| WizardError::UnknownStep(s.to_string()))
    }
}

/// The single active state of a wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WizardState {
    /// Collecting input for a step (or showing the landing page).
    Collecting { step: WizardStep },
    /// A submission is in flight.
    Loading,
    /// The last submission succeeded.
    Results { result: PredictionResult },
    /// The last submission failed.
    Error { message: String },
}

impl WizardState {
    pub fn step(&self) -> Option<WizardStep> {
        match self {
            Self::Collecting { step } => Some(*step),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Self::Results { result } => Some(result),
            _ => None,
        }
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::Collecting {
            step: WizardStep::Landing,
        }
    }
}

impl std::fmt::Display for WizardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collecting { step } => write!(f, "{step}"),
            Self::Loading => write!(f, "loading"),
            Self::Results { .. } => write!(f, "results"),
            Self::Error { .. } => write!(f, "error"),
        }
    }
}
