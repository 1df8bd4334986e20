//! WizardManager: owns the wizard, runs submissions against the configured
//! predictor and records their outcome.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::error::{PredictionError, WizardError};
use crate::insights::{FormReadings, Insights};
use crate::prediction::Predictor;

use super::editor::EditDialog;
use super::form::{EditField, FormData, StepOutput};
use super::machine::{Advance, Wizard};
use super::state::{WizardState, WizardStep};

/// Everything a client needs to render the wizard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    #[serde(flatten)]
    pub state: WizardState,
    pub form_data: FormData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit: Option<EditDialog>,
    pub readings: FormReadings,
    /// Climate advice, shown alongside a successful result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Insights>,
}

impl WizardSnapshot {
    fn of(wizard: &Wizard) -> Self {
        let insights = match (wizard.state(), wizard.form().rainfall.as_ref()) {
            (WizardState::Results { .. }, Some(r)) => {
                Some(Insights::new(r.rainfall, r.min_temp, r.max_temp))
            }
            _ => None,
        };
        Self {
            state: wizard.state().clone(),
            form_data: wizard.form().clone(),
            edit: wizard.edit_dialog().cloned(),
            readings: FormReadings::from_form(wizard.form()),
            insights,
        }
    }
}

/// Coordinates the single wizard instance and its prediction round-trips.
///
/// The lock is released while the predictor runs. Every mutation made
/// during that window fails with [`WizardError::SubmissionInFlight`].
#[derive(Clone)]
pub struct WizardManager {
    wizard: Arc<Mutex<Wizard>>,
    predictor: Arc<dyn Predictor>,
}

impl WizardManager {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self {
            wizard: Arc::new(Mutex::new(Wizard::new())),
            predictor,
        }
    }

    pub fn predictor_name(&self) -> &str {
        self.predictor.name()
    }

    pub async fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot::of(&*self.wizard.lock().await)
    }

    /// Run a synchronous wizard transition under the lock.
    async fn apply<T>(
        &self,
        f: impl FnOnce(&mut Wizard) -> Result<T, WizardError>,
    ) -> Result<(T, WizardSnapshot), WizardError> {
        let mut wizard = self.wizard.lock().await;
        let value = f(&mut *wizard)?;
        Ok((value, WizardSnapshot::of(&wizard)))
    }

    pub async fn start(&self) -> Result<WizardSnapshot, WizardError> {
        let (_, snapshot) = self.apply(Wizard::start).await?;
        info!("Wizard started");
        Ok(snapshot)
    }

    pub async fn draft(&self, step: WizardStep) -> Option<StepOutput> {
        self.wizard.lock().await.draft(step)
    }

    /// Complete `step`. Completing the final step submits the form and
    /// returns once the outcome has been recorded.
    pub async fn advance(
        &self,
        step: WizardStep,
        output: StepOutput,
    ) -> Result<WizardSnapshot, WizardError> {
        let (advance, snapshot) = self.apply(|w| w.advance(step, output)).await?;
        match advance {
            Advance::Moved(_) => Ok(snapshot),
            Advance::Submit(form) => Ok(self.run_submission(form).await),
        }
    }

    pub async fn go_back(&self) -> Result<WizardSnapshot, WizardError> {
        let (step, snapshot) = self.apply(Wizard::go_back).await?;
        info!(step = %step, "Wizard went back");
        Ok(snapshot)
    }

    pub async fn retry(&self) -> Result<WizardSnapshot, WizardError> {
        let (form, _) = self.apply(Wizard::retry).await?;
        info!("Retrying last submission");
        Ok(self.run_submission(form).await)
    }

    pub async fn start_over(&self) -> Result<WizardSnapshot, WizardError> {
        let (_, snapshot) = self.apply(Wizard::start_over).await?;
        info!("Wizard reset");
        Ok(snapshot)
    }

    pub async fn open_edit(&self, field: EditField) -> Result<WizardSnapshot, WizardError> {
        let (_, snapshot) = self.apply(|w| w.open_edit(field).map(|_| ())).await?;
        Ok(snapshot)
    }

    pub async fn update_edit(&self, buffer: StepOutput) -> Result<WizardSnapshot, WizardError> {
        let (_, snapshot) = self.apply(|w| w.update_edit(buffer).map(|_| ())).await?;
        Ok(snapshot)
    }

    pub async fn cancel_edit(&self) -> Result<WizardSnapshot, WizardError> {
        let (_, snapshot) = self.apply(Wizard::cancel_edit).await?;
        Ok(snapshot)
    }

    /// Save the open dialog and recalculate.
    pub async fn save_edit(&self) -> Result<WizardSnapshot, WizardError> {
        let (form, _) = self.apply(Wizard::save_edit).await?;
        Ok(self.run_submission(form).await)
    }

    /// Replace `field` with `data` and recalculate.
    pub async fn save(
        &self,
        field: EditField,
        data: StepOutput,
    ) -> Result<WizardSnapshot, WizardError> {
        let (form, _) = self.apply(|w| w.save(field, data)).await?;
        Ok(self.run_submission(form).await)
    }

    /// Submit `form` and record the outcome. The wizard must already be in
    /// `Loading`.
    ///
    /// The prediction runs in its own task so the outcome is recorded even
    /// if the caller goes away.
    async fn run_submission(&self, form: FormData) -> WizardSnapshot {
        let predictor = Arc::clone(&self.predictor);
        let wizard = Arc::clone(&self.wizard);

        let task = tokio::spawn(async move {
            let outcome = predictor.submit(&form).await;
            match &outcome {
                Ok(result) => info!(
                    predictor = predictor.name(),
                    headline = result.headline(),
                    "Prediction completed"
                ),
                Err(e) => warn!(predictor = predictor.name(), error = %e, "Prediction failed"),
            }
            let mut wizard = wizard.lock().await;
            if let Err(e) = wizard.complete_submission(outcome) {
                warn!(error = %e, "Dropped prediction outcome");
            }
        });

        if let Err(e) = task.await {
            error!(error = %e, "Prediction task aborted");
            let mut wizard = self.wizard.lock().await;
            if wizard.state().is_loading() {
                let interrupted =
                    PredictionError::Transport("Prediction was interrupted".to_string());
                if let Err(e) = wizard.complete_submission(Err(interrupted)) {
                    warn!(error = %e, "Failed to record interrupted prediction");
                }
            }
        }

        self.snapshot().await
    }
}
