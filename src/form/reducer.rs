//! Reducer for form state.

use serde_json::Value;

use crate::mvi::Reducer;

use super::field::{ChangeFn, FieldState, FormState, Input, Transform};
use super::intent::FormIntent;
use super::registry::ErrorMessageRegistry;

/// Reducer for form state transitions.
///
/// Total over its intents: references to unknown fields, non-object
/// patches and error updates on untracked fields leave the state as it was.
#[derive(Debug, Clone, Default)]
pub struct FormReducer {
    defaults: ErrorMessageRegistry,
}

impl FormReducer {
    pub fn new(defaults: ErrorMessageRegistry) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &ErrorMessageRegistry {
        &self.defaults
    }

    /// Clears the error of a tracked field and restores its default message.
    fn clear_error(&self, name: &str, field: &mut FieldState) {
        if field.is_error_tracked() {
            field.error = Some(false);
            field.error_message = self.defaults.get(name).map(str::to_string);
        }
    }

    fn apply_change(
        &self,
        state: FormState,
        field: String,
        input: Input,
        transform: Option<ChangeFn>,
    ) -> FormState {
        if !state.contains(&field) {
            return state;
        }

        let outcome = transform
            .map(|t| t.call(input.value(), &state, input.event()))
            .unwrap_or_default();
        self.apply_outcome(state, field, input, outcome)
    }

    fn apply_outcome(
        &self,
        mut state: FormState,
        field: String,
        input: Input,
        outcome: Transform,
    ) -> FormState {
        if !state.contains(&field) {
            return state;
        }

        match outcome {
            Transform::Replace(value) => {
                if let Some(target) = state.get_mut(&field) {
                    target.value = value;
                    self.clear_error(&field, target);
                }
            }
            Transform::Patch(patch) => {
                for (name, value) in patch {
                    if let Some(target) = state.get_mut(&name) {
                        target.value = value;
                        self.clear_error(&name, target);
                    }
                }
            }
            Transform::Unchanged => {
                if let Some(target) = state.get_mut(&field) {
                    target.value = input.into_value();
                    // Message stays as-is on a plain change.
                    if target.is_error_tracked() {
                        target.error = Some(false);
                    }
                }
            }
        }
        state
    }
}

impl Reducer for FormReducer {
    type State = FormState;
    type Intent = FormIntent;

    fn reduce(&self, state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FormIntent::Change {
                field,
                input,
                transform,
            } => self.apply_change(state, field, input, transform),

            FormIntent::Resolved {
                field,
                input,
                outcome,
            } => self.apply_outcome(state, field, input, outcome),

            FormIntent::Error {
                field,
                error,
                message,
            } => {
                let mut state = state;
                if let Some(target) = state.get_mut(&field) {
                    if target.is_error_tracked() {
                        target.error = Some(error);
                        target.error_message = message;
                    }
                }
                state
            }

            FormIntent::Replace { patch } => match patch {
                Value::Object(values) => {
                    let mut state = state;
                    for (name, value) in values {
                        if let Some(target) = state.get_mut(&name) {
                            target.value = value;
                        }
                    }
                    state
                }
                _ => state,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::field::InputEvent;
    use serde_json::json;

    fn state() -> FormState {
        [
            (
                "name".to_string(),
                FieldState {
                    value: json!(""),
                    error: None,
                    error_message: None,
                },
            ),
            (
                "email".to_string(),
                FieldState {
                    value: json!(""),
                    error: Some(true),
                    error_message: Some("custom".to_string()),
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    fn reducer() -> FormReducer {
        let registry = crate::form::FieldRegistry::new(
            [(
                "email".to_string(),
                crate::form::FieldDefinition::new("")
                    .tracked(false)
                    .error_message("required"),
            )]
            .into_iter()
            .collect(),
        );
        FormReducer::new(registry.error_messages().clone())
    }

    fn change(field: &str, input: impl Into<Input>, transform: Option<ChangeFn>) -> FormIntent {
        FormIntent::Change {
            field: field.to_string(),
            input: input.into(),
            transform,
        }
    }

    #[test]
    fn plain_change_clears_error_but_keeps_message() {
        let new = reducer().reduce(state(), change("email", "a@b.c", None));
        let email = new.get("email").unwrap();
        assert_eq!(email.value, json!("a@b.c"));
        assert_eq!(email.error, Some(false));
        assert_eq!(email.error_message.as_deref(), Some("custom"));
    }

    #[test]
    fn event_input_is_unwrapped() {
        let input = InputEvent::new("typed").with_name("name");
        let new = reducer().reduce(state(), change("name", input, None));
        assert_eq!(new.value("name"), Some(&json!("typed")));
        assert!(!new.get("name").unwrap().is_error_tracked());
    }

    #[test]
    fn replace_transform_restores_default_message() {
        let upper = ChangeFn::new(|v: &Value, _: &FormState, _: Option<&InputEvent>| {
            v.as_str().map(str::to_uppercase).unwrap_or_default()
        });
        let new = reducer().reduce(state(), change("email", "x", Some(upper)));
        let email = new.get("email").unwrap();
        assert_eq!(email.value, json!("X"));
        assert_eq!(email.error, Some(false));
        assert_eq!(email.error_message.as_deref(), Some("required"));
    }

    #[test]
    fn unchanged_transform_falls_back_to_input() {
        let noop = ChangeFn::new(|_: &Value, _: &FormState, _: Option<&InputEvent>| ());
        let new = reducer().reduce(state(), change("name", "raw", Some(noop)));
        assert_eq!(new.value("name"), Some(&json!("raw")));
    }

    #[test]
    fn resolved_change_applies_outcome() {
        let intent = FormIntent::Resolved {
            field: "email".to_string(),
            input: "typed".into(),
            outcome: Transform::Replace(json!("stored")),
        };
        let new = reducer().reduce(state(), intent);
        let email = new.get("email").unwrap();
        assert_eq!(email.value, json!("stored"));
        assert_eq!(email.error_message.as_deref(), Some("required"));
    }

    #[test]
    fn unknown_field_change_is_noop() {
        let new = reducer().reduce(state(), change("missing", "x", None));
        assert_eq!(new, state());
    }

    #[test]
    fn error_on_untracked_field_is_ignored() {
        let new = reducer().reduce(
            state(),
            FormIntent::Error {
                field: "name".to_string(),
                error: true,
                message: Some("nope".to_string()),
            },
        );
        assert_eq!(new, state());
    }

    #[test]
    fn replace_with_non_object_is_noop() {
        let new = reducer().reduce(state(), FormIntent::Replace { patch: json!("x") });
        assert_eq!(new, state());
    }
}
