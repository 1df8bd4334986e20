//! Error types for agri-yield.

use std::time::Duration;

use crate::wizard::form::EditField;
use crate::wizard::state::{WizardState, WizardStep};

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Prediction error: {0}")]
    Prediction(#[from] PredictionError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Failures of a prediction submission.
///
/// The `Display` output is the message shown on the wizard's error screen.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    /// Non-success HTTP status from the prediction endpoint.
    #[error("API error: {}", status_line(.status, .reason))]
    RemoteRejection { status: u16, reason: String },

    /// Network-level failure (DNS, refused connection, broken body).
    #[error("{0}")]
    Transport(String),

    /// The response body did not have the `{ predicted_yield: number }` shape.
    #[error("Invalid response from prediction server: {0}")]
    MalformedResponse(String),

    #[error("Prediction request timed out after {0:?}")]
    Timeout(Duration),
}

/// `"<status> <reason>"`, or just the status when the reason is unknown.
fn status_line(status: &u16, reason: &str) -> String {
    if reason.trim().is_empty() {
        status.to_string()
    } else {
        format!("{status} {reason}")
    }
}

/// Wizard state machine errors. None of these change wizard state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
    #[error("Input for step {step} is incomplete or out of range")]
    ValidationFailed { step: WizardStep },

    #[error("Step {step} is not active (current state: {current})")]
    WrongStep { step: WizardStep, current: String },

    #[error("Step {step} does not accept {field} data")]
    SlotMismatch { step: WizardStep, field: EditField },

    #[error("Cannot {action} while in state {state}")]
    InvalidTransition { action: String, state: String },

    #[error("A prediction is already in flight")]
    SubmissionInFlight,

    #[error("No edit dialog is open")]
    NoEditOpen,

    #[error("Nothing has been submitted yet")]
    NothingToRetry,

    #[error("Unknown wizard step or field: {0}")]
    UnknownStep(String),
}

impl WizardError {
    pub(crate) fn invalid_transition(action: &str, state: &WizardState) -> Self {
        Self::InvalidTransition {
            action: action.to_string(),
            state: state.to_string(),
        }
    }
}

/// Key-value store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store file {path} does not contain a JSON object")]
    Corrupt { path: String },
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_rejection_message_carries_status_line() {
        let err = PredictionError::RemoteRejection {
            status: 500,
            reason: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 Internal Server Error");
    }

    #[test]
    fn unknown_status_has_no_trailing_space() {
        let err = PredictionError::RemoteRejection {
            status: 599,
            reason: String::new(),
        };
        assert_eq!(err.to_string(), "API error: 599");
    }

    #[test]
    fn transport_message_is_verbatim() {
        let err = PredictionError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn wizard_error_converts_to_top_level() {
        let err: Error = WizardError::SubmissionInFlight.into();
        assert!(err.to_string().contains("in flight"));
    }
}
