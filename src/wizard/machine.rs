//! The wizard itself: current state, the form accumulator and the last
//! submitted snapshot.
//!
//! All methods are synchronous and never touch the network. A transition that
//! needs a prediction moves the wizard to `Loading` and hands back the form
//! to submit; the caller reports the outcome with
//! [`Wizard::complete_submission`].

use tracing::debug;

use crate::error::{PredictionError, WizardError};
use crate::prediction::PredictionResult;

use super::editor::EditDialog;
use super::form::{FormData, StepOutput};
use super::state::{WizardState, WizardStep};
use super::validate::validate;

/// Outcome of a successful [`Wizard::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Moved to the next input step.
    Moved(WizardStep),
    /// The final step was completed; submit this form.
    Submit(FormData),
}

#[derive(Debug, Clone, Default)]
pub struct Wizard {
    pub(super) state: WizardState,
    pub(super) form: FormData,
    /// Form sent with the most recent submission, reused by `retry`.
    pub(super) last_submitted: Option<FormData>,
    pub(super) edit: Option<EditDialog>,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn last_submitted(&self) -> Option<&FormData> {
        self.last_submitted.as_ref()
    }

    /// Fails while a submission is in flight.
    pub(super) fn ensure_idle(&self) -> Result<(), WizardError> {
        if self.state.is_loading() {
            Err(WizardError::SubmissionInFlight)
        } else {
            Ok(())
        }
    }

    /// Leave the landing page for the first input step.
    pub fn start(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_idle()?;
        match self.state.step() {
            Some(WizardStep::Landing) => {
                self.state = WizardState::Collecting {
                    step: WizardStep::Location,
                };
                Ok(WizardStep::Location)
            }
            _ => Err(WizardError::invalid_transition("start", &self.state)),
        }
    }

    /// Complete `step` with `output`.
    ///
    /// Rejects the call without changing anything if `step` is not active,
    /// the payload belongs to another slot, or the step's validator fails.
    pub fn advance(&mut self, step: WizardStep, output: StepOutput) -> Result<Advance, WizardError> {
        self.ensure_idle()?;
        if self.state.step() != Some(step) {
            return Err(WizardError::WrongStep {
                step,
                current: self.state.to_string(),
            });
        }
        let Some(field) = step.field() else {
            return Err(WizardError::invalid_transition("advance", &self.state));
        };
        if output.field() != field {
            return Err(WizardError::SlotMismatch {
                step,
                field: output.field(),
            });
        }
        if !validate(step, &output) {
            return Err(WizardError::ValidationFailed { step });
        }

        self.form = self.form.with(output);

        match step.next() {
            Some(next) => {
                debug!(from = %step, to = %next, "Wizard advanced");
                self.state = WizardState::Collecting { step: next };
                Ok(Advance::Moved(next))
            }
            None => Ok(Advance::Submit(self.begin_submission())),
        }
    }

    /// Move to the predecessor of the active step. Collected slots are kept.
    ///
    /// On the landing page this is a no-op.
    pub fn go_back(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_idle()?;
        let Some(step) = self.state.step() else {
            return Err(WizardError::invalid_transition("go back", &self.state));
        };
        let target = step.previous().unwrap_or(step);
        self.state = WizardState::Collecting { step: target };
        Ok(target)
    }

    /// Initial values for `step`'s input form: the collected slot if there
    /// is one, otherwise the form's defaults.
    pub fn draft(&self, step: WizardStep) -> Option<StepOutput> {
        let field = step.field()?;
        Some(
            self.form
                .slot(field)
                .unwrap_or_else(|| StepOutput::form_default(field)),
        )
    }

    /// Enter `Loading` and return the form to send.
    pub(super) fn begin_submission(&mut self) -> FormData {
        self.state = WizardState::Loading;
        self.edit = None;
        self.last_submitted = Some(self.form.clone());
        self.form.clone()
    }

    /// Record the outcome of the in-flight submission.
    pub fn complete_submission(
        &mut self,
        outcome: Result<PredictionResult, PredictionError>,
    ) -> Result<(), WizardError> {
        if !self.state.is_loading() {
            return Err(WizardError::invalid_transition("complete a submission", &self.state));
        }
        self.state = match outcome {
            Ok(result) => WizardState::Results { result },
            Err(e) => WizardState::Error {
                message: e.to_string(),
            },
        };
        Ok(())
    }

    /// Resubmit the last submitted form after a failure.
    pub fn retry(&mut self) -> Result<FormData, WizardError> {
        self.ensure_idle()?;
        if !matches!(self.state, WizardState::Error { .. }) {
            return Err(WizardError::invalid_transition("retry", &self.state));
        }
        let form = self
            .last_submitted
            .clone()
            .ok_or(WizardError::NothingToRetry)?;
        self.form = form.clone();
        self.state = WizardState::Loading;
        Ok(form)
    }

    /// Discard everything and return to the landing page.
    pub fn start_over(&mut self) -> Result<(), WizardError> {
        self.ensure_idle()?;
        *self = Self::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::YieldPrediction;
    use crate::wizard::fixtures::canonical_inputs;
    use crate::wizard::form::LocationData;

    fn submitted_wizard() -> (Wizard, FormData) {
        let mut wizard = Wizard::new();
        wizard.start().unwrap();
        let mut submitted = None;
        for (step, output) in canonical_inputs() {
            if let Advance::Submit(form) = wizard.advance(step, output).unwrap() {
                submitted = Some(form);
            }
        }
        (wizard, submitted.expect("crop step should submit"))
    }

    fn yield_of(value: f64) -> PredictionResult {
        PredictionResult::Remote(YieldPrediction {
            predicted_yield: value,
        })
    }

    #[test]
    fn forward_pass_fills_slots_in_order_and_submits() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.start().unwrap(), WizardStep::Location);

        let inputs = canonical_inputs();
        for (i, (step, output)) in inputs.iter().cloned().enumerate() {
            let outcome = wizard.advance(step, output).unwrap();
            if step.is_final() {
                assert!(matches!(outcome, Advance::Submit(_)));
            } else {
                assert_eq!(outcome, Advance::Moved(step.next().unwrap()));
            }
            // Slots after this one are still empty.
            for (later, _) in &inputs[i + 1..] {
                assert!(wizard.form().slot(later.field().unwrap()).is_none());
            }
        }
        assert!(wizard.state().is_loading());
        assert!(wizard.form().is_complete());
        assert_eq!(wizard.last_submitted(), Some(wizard.form()));
    }

    #[test]
    fn invalid_data_never_changes_state() {
        let mut wizard = Wizard::new();
        wizard.start().unwrap();
        let before = wizard.clone();

        let bad = StepOutput::Location(LocationData {
            district: " ".to_string(),
            taluka: String::new(),
        });
        assert_eq!(
            wizard.advance(WizardStep::Location, bad),
            Err(WizardError::ValidationFailed {
                step: WizardStep::Location
            })
        );
        assert_eq!(wizard.state(), before.state());
        assert_eq!(wizard.form(), before.form());
    }

    #[test]
    fn advance_rejects_inactive_step_and_wrong_slot() {
        let mut wizard = Wizard::new();
        wizard.start().unwrap();
        let inputs = canonical_inputs();

        let err = wizard
            .advance(WizardStep::Soil, inputs[1].1.clone())
            .unwrap_err();
        assert!(matches!(err, WizardError::WrongStep { .. }));

        let err = wizard
            .advance(WizardStep::Location, inputs[1].1.clone())
            .unwrap_err();
        assert!(matches!(err, WizardError::SlotMismatch { .. }));
        assert_eq!(wizard.state().step(), Some(WizardStep::Location));
    }

    #[test]
    fn back_then_forward_keeps_form_content() {
        let mut wizard = Wizard::new();
        wizard.start().unwrap();
        let inputs = canonical_inputs();
        for (step, output) in inputs.iter().take(3).cloned() {
            wizard.advance(step, output).unwrap();
        }
        let form_before = wizard.form().clone();
        assert_eq!(wizard.state().step(), Some(WizardStep::Rainfall));

        assert_eq!(wizard.go_back().unwrap(), WizardStep::Fertilizer);
        assert_eq!(wizard.go_back().unwrap(), WizardStep::Soil);
        assert_eq!(wizard.form(), &form_before);

        // Resume forward with the drafts the accumulator hands back.
        for step in [WizardStep::Soil, WizardStep::Fertilizer] {
            let draft = wizard.draft(step).unwrap();
            wizard.advance(step, draft).unwrap();
        }
        assert_eq!(wizard.form(), &form_before);
        assert_eq!(wizard.state().step(), Some(WizardStep::Rainfall));
    }

    #[test]
    fn back_from_landing_is_noop_and_location_returns_to_landing() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.go_back().unwrap(), WizardStep::Landing);
        wizard.start().unwrap();
        assert_eq!(wizard.go_back().unwrap(), WizardStep::Landing);
    }

    #[test]
    fn draft_falls_back_to_form_defaults() {
        let wizard = Wizard::new();
        assert!(wizard.draft(WizardStep::Landing).is_none());
        match wizard.draft(WizardStep::Rainfall).unwrap() {
            StepOutput::Rainfall(r) => assert_eq!(r.rainfall, 1150.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn loading_blocks_every_mutation() {
        let (mut wizard, _) = submitted_wizard();
        assert_eq!(wizard.go_back(), Err(WizardError::SubmissionInFlight));
        assert_eq!(wizard.start_over(), Err(WizardError::SubmissionInFlight));
        assert_eq!(wizard.retry(), Err(WizardError::SubmissionInFlight));
        assert_eq!(wizard.start(), Err(WizardError::SubmissionInFlight));
    }

    #[test]
    fn success_lands_in_results() {
        let (mut wizard, _) = submitted_wizard();
        wizard.complete_submission(Ok(yield_of(3120.0))).unwrap();
        assert_eq!(wizard.state().result(), Some(&yield_of(3120.0)));
        // Can't complete twice.
        assert!(wizard.complete_submission(Ok(yield_of(1.0))).is_err());
    }

    #[test]
    fn failure_then_retry_reuses_submitted_form() {
        let (mut wizard, submitted) = submitted_wizard();
        wizard
            .complete_submission(Err(PredictionError::RemoteRejection {
                status: 500,
                reason: "Internal Server Error".to_string(),
            }))
            .unwrap();
        match wizard.state() {
            WizardState::Error { message } => assert!(message.contains("500")),
            other => panic!("unexpected {other:?}"),
        }

        let retried = wizard.retry().unwrap();
        assert_eq!(retried, submitted);
        assert!(wizard.state().is_loading());
    }

    #[test]
    fn retry_only_from_error() {
        let (mut wizard, _) = submitted_wizard();
        wizard.complete_submission(Ok(yield_of(10.0))).unwrap();
        assert!(matches!(
            wizard.retry(),
            Err(WizardError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn start_over_clears_everything() {
        let (mut wizard, _) = submitted_wizard();
        wizard
            .complete_submission(Err(PredictionError::Transport("refused".into())))
            .unwrap();
        wizard.start_over().unwrap();
        assert_eq!(wizard.state(), &WizardState::default());
        assert_eq!(wizard.form(), &FormData::default());
        assert!(wizard.last_submitted().is_none());
    }
}
