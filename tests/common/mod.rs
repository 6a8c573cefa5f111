//! Shared test fixtures.

#![allow(dead_code, unused_imports)]

pub mod mock_scroll;

use parking_lot::Mutex;
use serde_json::{json, Value};
use statehooks::form::{FieldDefinition, FormArgs, FormState, InputEvent, Transform};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const TEST_CHANGE: &str = "TEST-CHANGE";
pub const DEFAULT_FIELD1_ERROR_MESSAGE: &str = "FIELD1_ERROR_MESSAGE";
pub const DEFAULT_FIELD2_ERROR_MESSAGE: &str = "FIELD2_ERROR_MESSAGE";
pub const DEFAULT_FIELD4_ERROR_MESSAGE: &str = "FIELD4_ERROR_MESSAGE";

/// Appends `+TEST-CHANGE` to the incoming text.
pub fn handle_field_change(value: &Value, _: &FormState, _: Option<&InputEvent>) -> Transform {
    let text = value
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string());
    Transform::Replace(json!(format!("{}+{}", text, TEST_CHANGE)))
}

/// Rewrites three fields at once, copying field2 into field3.
pub fn handle_fields_change(_: &Value, state: &FormState, _: Option<&InputEvent>) -> Transform {
    Transform::patch([
        ("field1", json!("Changing")),
        ("field2", json!("AWESOME")),
        ("field3", state.value("field2").cloned().unwrap_or(Value::Null)),
    ])
}

/// Records every call made to the form's callbacks.
#[derive(Clone, Default)]
pub struct Calls {
    pub submits: Arc<Mutex<Vec<FormState>>>,
    pub errors: Arc<Mutex<Vec<(FormState, Vec<Value>)>>>,
    /// What `on_error` returns.
    pub error_response: Arc<Mutex<Option<BTreeMap<String, String>>>>,
}

impl Calls {
    pub fn respond_with_errors(&self, errors: &[(&str, &str)]) {
        *self.error_response.lock() = Some(
            errors
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
    }
}

/// Five fields: two tracked with transforms, two plain, one debounced.
pub fn field_definitions() -> BTreeMap<String, FieldDefinition> {
    let mut fields = BTreeMap::new();
    fields.insert(
        "field1".to_string(),
        FieldDefinition::new("")
            .on_change(handle_field_change)
            .tracked(false)
            .error_message(DEFAULT_FIELD1_ERROR_MESSAGE),
    );
    fields.insert(
        "field2".to_string(),
        FieldDefinition::new("")
            .on_change(handle_fields_change)
            .on_blur(handle_field_change)
            .tracked(false)
            .error_message(DEFAULT_FIELD2_ERROR_MESSAGE),
    );
    fields.insert("field3".to_string(), FieldDefinition::new(""));
    fields.insert(
        "field4".to_string(),
        FieldDefinition::new("")
            .on_change(handle_field_change)
            .debounced()
            .tracked(false)
            .error_message(DEFAULT_FIELD4_ERROR_MESSAGE),
    );
    fields.insert("field5".to_string(), FieldDefinition::new(""));
    fields
}

/// Form arguments wired to record into `calls`.
pub fn form_args(fields: BTreeMap<String, FieldDefinition>, calls: &Calls) -> FormArgs {
    let submits = Arc::clone(&calls.submits);
    let errors = Arc::clone(&calls.errors);
    let response = Arc::clone(&calls.error_response);

    FormArgs::from_fields(fields)
        .on_submit(move |state| submits.lock().push(state.clone()))
        .on_error(move |state, params| {
            errors.lock().push((state.clone(), params.to_vec()));
            response.lock().clone()
        })
}
