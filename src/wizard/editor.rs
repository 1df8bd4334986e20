//! Results editor. Edit any collected slot from the results screen and
//! recalculate.
//!
//! Saving never patches the displayed result. The edited slot replaces the
//! old one wholesale and the whole form is submitted again.

use serde::Serialize;
use tracing::debug;

use crate::error::WizardError;

use super::form::{EditField, FormData, StepOutput};
use super::machine::Wizard;
use super::state::{WizardState, WizardStep};

/// The single open edit dialog and its working copy of the slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditDialog {
    pub field: EditField,
    pub buffer: StepOutput,
}

impl Wizard {
    pub fn edit_dialog(&self) -> Option<&EditDialog> {
        self.edit.as_ref()
    }

    fn ensure_results(&self, action: &str) -> Result<(), WizardError> {
        self.ensure_idle()?;
        match self.state {
            WizardState::Results { .. } => Ok(()),
            _ => Err(WizardError::invalid_transition(action, &self.state)),
        }
    }

    /// Open the dialog for `field`, seeding its buffer from the current slot
    /// or a zero-valued payload. Replaces any dialog already open.
    pub fn open_edit(&mut self, field: EditField) -> Result<&EditDialog, WizardError> {
        self.ensure_results("edit")?;
        let buffer = self
            .form
            .slot(field)
            .unwrap_or_else(|| StepOutput::empty(field));
        debug!(field = %field, "Opened edit dialog");
        Ok(self.edit.insert(EditDialog { field, buffer }))
    }

    /// Replace the working copy of the open dialog.
    pub fn update_edit(&mut self, buffer: StepOutput) -> Result<&EditDialog, WizardError> {
        self.ensure_idle()?;
        let dialog = self.edit.as_mut().ok_or(WizardError::NoEditOpen)?;
        if buffer.field() != dialog.field {
            return Err(WizardError::SlotMismatch {
                step: WizardStep::for_field(dialog.field),
                field: buffer.field(),
            });
        }
        dialog.buffer = buffer;
        Ok(dialog)
    }

    /// Close the open dialog without touching the form.
    pub fn cancel_edit(&mut self) -> Result<(), WizardError> {
        self.ensure_idle()?;
        self.edit.take().map(|_| ()).ok_or(WizardError::NoEditOpen)
    }

    /// Save the open dialog's buffer. See [`Wizard::save`].
    pub fn save_edit(&mut self) -> Result<FormData, WizardError> {
        self.ensure_results("save an edit")?;
        let dialog = self.edit.take().ok_or(WizardError::NoEditOpen)?;
        self.save(dialog.field, dialog.buffer)
    }

    /// Replace `field`'s slot with `data`, close any dialog and enter
    /// `Loading`. Returns the updated form to submit.
    pub fn save(&mut self, field: EditField, data: StepOutput) -> Result<FormData, WizardError> {
        self.ensure_results("save an edit")?;
        if data.field() != field {
            return Err(WizardError::SlotMismatch {
                step: WizardStep::for_field(field),
                field: data.field(),
            });
        }
        self.form = self.form.with(data);
        debug!(field = %field, slot = field.slot_name(), "Slot replaced, recalculating");
        Ok(self.begin_submission())
    }
}
