//! Field definitions, per-field state and the values crossing the UI boundary.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::mvi::UiState;

/// Returns whether a value counts as "filled in".
///
/// `null`, `false`, `0`, `NaN` and the empty string are falsy. Arrays and
/// objects are always truthy, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A change notification coming from an input element.
///
/// UI adapters build one of these from their native event type so the form
/// core never has to inspect host-specific event objects.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    /// Current value of the element that fired the event.
    pub value: Value,
    /// The element's `name` attribute, when the host exposes one.
    pub name: Option<String>,
}

impl InputEvent {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// What a change or blur handler receives.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// A value dispatched directly by the caller.
    Value(Value),
    /// A native input event; its value is extracted before reducing.
    Event(InputEvent),
}

impl Input {
    /// The canonical value carried by this input.
    pub fn value(&self) -> &Value {
        match self {
            Input::Value(value) => value,
            Input::Event(event) => &event.value,
        }
    }

    /// The originating event, if any.
    pub fn event(&self) -> Option<&InputEvent> {
        match self {
            Input::Value(_) => None,
            Input::Event(event) => Some(event),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Input::Value(value) => value,
            Input::Event(event) => event.value,
        }
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        Input::Value(value)
    }
}

impl From<InputEvent> for Input {
    fn from(event: InputEvent) -> Self {
        Input::Event(event)
    }
}

impl From<&str> for Input {
    fn from(value: &str) -> Self {
        Input::Value(Value::from(value))
    }
}

impl From<String> for Input {
    fn from(value: String) -> Self {
        Input::Value(Value::from(value))
    }
}

impl From<bool> for Input {
    fn from(value: bool) -> Self {
        Input::Value(Value::from(value))
    }
}

impl From<i64> for Input {
    fn from(value: i64) -> Self {
        Input::Value(Value::from(value))
    }
}

impl From<f64> for Input {
    fn from(value: f64) -> Self {
        Input::Value(Value::from(value))
    }
}

/// Result of an `on_change` / `on_blur` transform.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Transform {
    /// Keep the incoming value as-is.
    #[default]
    Unchanged,
    /// Store this value in the target field instead of the incoming one.
    Replace(Value),
    /// Overwrite several fields at once. Unknown keys are ignored.
    Patch(Map<String, Value>),
}

impl Transform {
    pub fn patch<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Transform::Patch(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Falsy values fall through, objects become patches, anything else
/// replaces the target field's value.
impl From<Value> for Transform {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Transform::Patch(map),
            other if is_truthy(&other) => Transform::Replace(other),
            _ => Transform::Unchanged,
        }
    }
}

impl From<Option<Value>> for Transform {
    fn from(value: Option<Value>) -> Self {
        value.map(Transform::from).unwrap_or_default()
    }
}

impl From<()> for Transform {
    fn from(_: ()) -> Self {
        Transform::Unchanged
    }
}

impl From<String> for Transform {
    fn from(value: String) -> Self {
        Transform::from(Value::from(value))
    }
}

impl From<&str> for Transform {
    fn from(value: &str) -> Self {
        Transform::from(Value::from(value))
    }
}

/// Verdict of a field validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCheck {
    Pass,
    /// Invalid; show the field's default message.
    Fail,
    /// Invalid; show this message instead of the default.
    FailWith(String),
}

impl From<bool> for FieldCheck {
    fn from(failed: bool) -> Self {
        if failed {
            FieldCheck::Fail
        } else {
            FieldCheck::Pass
        }
    }
}

impl From<String> for FieldCheck {
    fn from(message: String) -> Self {
        if message.is_empty() {
            FieldCheck::Pass
        } else {
            FieldCheck::FailWith(message)
        }
    }
}

impl From<&str> for FieldCheck {
    fn from(message: &str) -> Self {
        FieldCheck::from(message.to_string())
    }
}

impl From<Option<String>> for FieldCheck {
    fn from(message: Option<String>) -> Self {
        message.map(FieldCheck::from).unwrap_or(FieldCheck::Pass)
    }
}

type TransformFn = dyn Fn(&Value, &FormState, Option<&InputEvent>) -> Transform + Send + Sync;
type ValidatorFn = dyn Fn(&Value, &FormState) -> FieldCheck + Send + Sync;

/// Shared `on_change` / `on_blur` callback.
#[derive(Clone)]
pub struct ChangeFn(Arc<TransformFn>);

impl ChangeFn {
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn(&Value, &FormState, Option<&InputEvent>) -> R + Send + Sync + 'static,
        R: Into<Transform>,
    {
        Self(Arc::new(move |value, state, event| f(value, state, event).into()))
    }

    pub fn call(&self, value: &Value, state: &FormState, event: Option<&InputEvent>) -> Transform {
        (self.0)(value, state, event)
    }
}

impl fmt::Debug for ChangeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChangeFn(..)")
    }
}

/// Shared field validator.
#[derive(Clone)]
pub struct FieldValidator(Arc<ValidatorFn>);

impl FieldValidator {
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn(&Value, &FormState) -> R + Send + Sync + 'static,
        R: Into<FieldCheck>,
    {
        Self(Arc::new(move |value, state| f(value, state).into()))
    }

    pub fn check(&self, value: &Value, state: &FormState) -> FieldCheck {
        (self.0)(value, state)
    }
}

impl fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldValidator(..)")
    }
}

/// Caller-supplied description of one form field.
///
/// The data part deserializes from JSON (`value`, `error`, `errorMessage`,
/// `withoutInputValue`); callbacks are attached with the builder methods.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    #[serde(default)]
    pub value: Value,
    /// Presence (even `false`) opts the field into validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Debounce updates instead of applying them immediately.
    #[serde(default)]
    pub without_input_value: bool,
    #[serde(skip)]
    pub on_change: Option<ChangeFn>,
    #[serde(skip)]
    pub on_blur: Option<ChangeFn>,
    #[serde(skip)]
    pub validator: Option<FieldValidator>,
}

impl FieldDefinition {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Track errors for this field, starting with the given flag.
    pub fn tracked(mut self, error: bool) -> Self {
        self.error = Some(error);
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn debounced(mut self) -> Self {
        self.without_input_value = true;
        self
    }

    pub fn on_change<F, R>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &FormState, Option<&InputEvent>) -> R + Send + Sync + 'static,
        R: Into<Transform>,
    {
        self.on_change = Some(ChangeFn::new(f));
        self
    }

    pub fn on_blur<F, R>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &FormState, Option<&InputEvent>) -> R + Send + Sync + 'static,
        R: Into<Transform>,
    {
        self.on_blur = Some(ChangeFn::new(f));
        self
    }

    pub fn validator<F, R>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &FormState) -> R + Send + Sync + 'static,
        R: Into<FieldCheck>,
    {
        self.validator = Some(FieldValidator::new(f));
        self
    }

    pub fn is_error_tracked(&self) -> bool {
        self.error.is_some()
    }
}

/// Current state of a single field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldState {
    pub value: Value,
    /// `Some` exactly for error-tracked fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl FieldState {
    pub fn is_error_tracked(&self) -> bool {
        self.error.is_some()
    }

    pub fn has_error(&self) -> bool {
        self.error == Some(true)
    }
}

/// Field name to field state. Keys are fixed once the form is created.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState(BTreeMap<String, FieldState>);

impl UiState for FormState {}

impl FormState {
    pub fn get(&self, field: &str) -> Option<&FieldState> {
        self.0.get(field)
    }

    pub(crate) fn get_mut(&mut self, field: &str) -> Option<&mut FieldState> {
        self.0.get_mut(field)
    }

    /// Shortcut for a field's current value.
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.0.get(field).map(|f| &f.value)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldState)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, FieldState)> for FormState {
    fn from_iter<I: IntoIterator<Item = (String, FieldState)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_matches_form_semantics() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!("a")));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn transform_from_value_classifies() {
        assert_eq!(Transform::from(json!(null)), Transform::Unchanged);
        assert_eq!(Transform::from(json!("")), Transform::Unchanged);
        assert_eq!(Transform::from(json!("x")), Transform::Replace(json!("x")));
        assert!(matches!(Transform::from(json!({"a": 1})), Transform::Patch(p) if p["a"] == 1));
    }

    #[test]
    fn field_check_from_string() {
        assert_eq!(FieldCheck::from(""), FieldCheck::Pass);
        assert_eq!(FieldCheck::from("bad"), FieldCheck::FailWith("bad".into()));
        assert_eq!(FieldCheck::from(true), FieldCheck::Fail);
    }

    #[test]
    fn definition_deserializes_data_part() {
        let def: FieldDefinition = serde_json::from_value(json!({
            "value": "",
            "error": false,
            "errorMessage": "required",
            "withoutInputValue": true
        }))
        .unwrap();
        assert_eq!(def.error, Some(false));
        assert_eq!(def.error_message.as_deref(), Some("required"));
        assert!(def.without_input_value);
        assert!(def.on_change.is_none());
    }

    #[test]
    fn field_state_serializes_without_absent_error_keys() {
        let state = FieldState {
            value: json!("x"),
            error: None,
            error_message: None,
        };
        assert_eq!(serde_json::to_value(&state).unwrap(), json!({"value": "x"}));
    }
}
