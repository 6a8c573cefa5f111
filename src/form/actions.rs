//! Submit, external error reporting and bulk replace.

use serde_json::Value;

use super::intent::FormIntent;
use super::UseForm;

impl UseForm {
    /// Pass the current state to `on_submit`. Does not validate.
    pub fn handle_submit(&self) {
        match &self.store.on_submit {
            Some(on_submit) => {
                let state = self.store.snapshot();
                tracing::debug!("Submitting form");
                on_submit(&state);
            }
            None => tracing::debug!("Submit requested without on_submit callback"),
        }
    }

    /// Report external errors through `on_error`.
    ///
    /// Every returned entry naming an existing field flags that field. An
    /// empty message keeps the field's previous message.
    pub fn handle_errors(&self, params: &[Value]) {
        let Some(on_error) = &self.store.on_error else {
            return;
        };

        let state = self.store.snapshot();
        let Some(errors) = on_error(&state, params) else {
            return;
        };

        for (field, message) in errors {
            let Some(current) = state.get(&field) else {
                tracing::warn!(field = %field, "Ignoring error for unknown field");
                continue;
            };
            let message = if message.is_empty() {
                current.error_message.clone()
            } else {
                Some(message)
            };
            tracing::debug!(field = %field, message = ?message, "External error reported");
            self.store.dispatch(FormIntent::Error {
                field,
                error: true,
                message,
            });
        }
    }

    /// Overwrite values of existing fields from a JSON object, e.g. after
    /// loading a record. Error flags and messages are kept.
    pub fn replace_form(&self, patch: impl Into<Value>) {
        self.store.dispatch(FormIntent::Replace {
            patch: patch.into(),
        });
    }
}
