//! Form validation.

use super::field::{is_truthy, FieldCheck, FormState};
use super::intent::FormIntent;
use super::registry::FieldRegistry;
use super::UseForm;

/// A field that failed validation and the message to show for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    pub field: String,
    pub message: Option<String>,
}

/// Scan `state` for invalid error-tracked fields.
///
/// A tracked field fails when its value is falsy, when it is already
/// flagged, or when its validator rejects it. The validator only runs for
/// fields that pass the first two checks. The message is the validator's
/// own message, else the registered default, else the field's current one.
pub fn find_errors(state: &FormState, registry: &FieldRegistry) -> Vec<FieldFailure> {
    let defaults = registry.error_messages();
    state
        .iter()
        .filter(|(_, field)| field.is_error_tracked())
        .filter_map(|(name, field)| {
            let verdict = if !is_truthy(&field.value) || field.has_error() {
                FieldCheck::Fail
            } else {
                registry
                    .definition(name)
                    .and_then(|d| d.validator.as_ref())
                    .map(|v| v.check(&field.value, state))
                    .unwrap_or(FieldCheck::Pass)
            };

            let message = match verdict {
                FieldCheck::Pass => return None,
                FieldCheck::Fail => defaults
                    .get(name)
                    .map(str::to_string)
                    .or_else(|| field.error_message.clone()),
                FieldCheck::FailWith(message) => Some(message),
            };
            Some(FieldFailure {
                field: name.clone(),
                message,
            })
        })
        .collect()
}

impl UseForm {
    /// Validate every error-tracked field.
    ///
    /// Failing fields are flagged before this returns, so the next
    /// [`state`](UseForm::state) already shows their messages.
    pub fn is_valid_form(&self) -> bool {
        let state = self.store.snapshot();
        let failures = find_errors(&state, &self.store.registry);

        for failure in &failures {
            tracing::debug!(
                field = %failure.field,
                message = ?failure.message,
                "Field failed validation"
            );
            self.store.dispatch(FormIntent::Error {
                field: failure.field.clone(),
                error: true,
                message: failure.message.clone(),
            });
        }

        failures.is_empty()
    }
}
