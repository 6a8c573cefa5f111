//! Intents accepted by the form reducer.

use serde_json::Value;

use crate::mvi::Intent;

use super::field::{ChangeFn, Input, Transform};

/// Intents that can be dispatched to [`FormReducer`](super::FormReducer).
#[derive(Debug, Clone)]
pub enum FormIntent {
    /// A field received new input, optionally run through a transform.
    Change {
        field: String,
        input: Input,
        transform: Option<ChangeFn>,
    },

    /// A change whose transform has already been evaluated.
    Resolved {
        field: String,
        input: Input,
        outcome: Transform,
    },

    /// Overwrite the error flag and message of one field.
    Error {
        field: String,
        error: bool,
        message: Option<String>,
    },

    /// Bulk-overwrite values from a JSON object keyed by field name.
    /// Anything other than an object is ignored.
    Replace { patch: Value },
}

impl Intent for FormIntent {}

impl FormIntent {
    /// Name of the field this intent targets, if it targets a single one.
    pub fn field(&self) -> Option<&str> {
        match self {
            FormIntent::Change { field, .. }
            | FormIntent::Resolved { field, .. }
            | FormIntent::Error { field, .. } => Some(field),
            FormIntent::Replace { .. } => None,
        }
    }
}
