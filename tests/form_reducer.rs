mod common;

use common::*;
use serde_json::{json, Value};
use statehooks::form::{
    ChangeFn, FieldRegistry, FormIntent, FormReducer, FormState, InputEvent, Transform,
};
use statehooks::mvi::Reducer;

fn setup() -> (FormReducer, FormState) {
    let registry = FieldRegistry::new(field_definitions());
    let reducer = FormReducer::new(registry.error_messages().clone());
    (reducer, registry.initial_state().clone())
}

fn change(field: &str, value: Value, transform: Option<ChangeFn>) -> FormIntent {
    FormIntent::Change {
        field: field.to_string(),
        input: value.into(),
        transform,
    }
}

fn flagged(reducer: &FormReducer, state: FormState, field: &str, message: &str) -> FormState {
    reducer.reduce(
        state,
        FormIntent::Error {
            field: field.to_string(),
            error: true,
            message: Some(message.to_string()),
        },
    )
}

#[test]
fn error_intent_only_touches_error_keys() {
    let (reducer, state) = setup();
    let state = reducer.reduce(state, change("field1", json!("kept"), None));
    let before = state.clone();

    let state = flagged(&reducer, state, "field1", "broken");

    let field1 = state.get("field1").unwrap();
    assert_eq!(field1.value, json!("kept"));
    assert_eq!(field1.error, Some(true));
    assert_eq!(field1.error_message.as_deref(), Some("broken"));
    for name in ["field2", "field3", "field4", "field5"] {
        assert_eq!(state.get(name), before.get(name));
    }
}

#[test]
fn plain_change_on_flagged_field_keeps_custom_message() {
    let (reducer, state) = setup();
    let state = flagged(&reducer, state, "field2", "server said no");

    let state = reducer.reduce(state, change("field2", json!("retry"), None));

    let field2 = state.get("field2").unwrap();
    assert_eq!(field2.value, json!("retry"));
    assert_eq!(field2.error, Some(false));
    assert_eq!(field2.error_message.as_deref(), Some("server said no"));
}

#[test]
fn transformed_change_restores_default_message() {
    let (reducer, state) = setup();
    let state = flagged(&reducer, state, "field1", "server said no");

    let state = reducer.reduce(
        state,
        change("field1", json!("x"), Some(ChangeFn::new(handle_field_change))),
    );

    let field1 = state.get("field1").unwrap();
    assert_eq!(field1.error, Some(false));
    assert_eq!(
        field1.error_message.as_deref(),
        Some(DEFAULT_FIELD1_ERROR_MESSAGE)
    );
}

#[test]
fn patch_ignores_unknown_fields() {
    let (reducer, state) = setup();
    let patcher = ChangeFn::new(|_: &Value, _: &FormState, _: Option<&InputEvent>| {
        Transform::patch([("field3", json!("yes")), ("ghost", json!("no"))])
    });

    let new = reducer.reduce(state.clone(), change("field5", json!("typed"), Some(patcher)));

    assert_eq!(new.value("field3"), Some(&json!("yes")));
    assert!(!new.contains("ghost"));
    // The patch replaces the incoming value; the target is not written.
    assert_eq!(new.value("field5"), Some(&json!("")));
    assert_eq!(new.len(), state.len());
}

#[test]
fn transform_receives_event_and_extracted_value() {
    let (reducer, state) = setup();
    let echo_name = ChangeFn::new(|value: &Value, _: &FormState, event: Option<&InputEvent>| {
        let name = event.and_then(|e| e.name.clone()).unwrap_or_default();
        json!(format!("{}:{}", name, value.as_str().unwrap_or_default()))
    });

    let intent = FormIntent::Change {
        field: "field3".to_string(),
        input: InputEvent::new("v").with_name("input-3").into(),
        transform: Some(echo_name),
    };
    let state = reducer.reduce(state, intent);

    assert_eq!(state.value("field3"), Some(&json!("input-3:v")));
}

#[test]
fn falsy_transform_result_falls_back_to_input() {
    let (reducer, state) = setup();
    let empty = ChangeFn::new(|_: &Value, _: &FormState, _: Option<&InputEvent>| json!(""));

    let state = reducer.reduce(state, change("field3", json!("raw"), Some(empty)));

    assert_eq!(state.value("field3"), Some(&json!("raw")));
}

#[test]
fn replace_leaves_error_state_alone() {
    let (reducer, state) = setup();
    let state = flagged(&reducer, state, "field1", "bad");

    let state = reducer.reduce(
        state,
        FormIntent::Replace {
            patch: json!({ "field1": "loaded", "field3": 42 }),
        },
    );

    let field1 = state.get("field1").unwrap();
    assert_eq!(field1.value, json!("loaded"));
    assert_eq!(field1.error, Some(true));
    assert_eq!(field1.error_message.as_deref(), Some("bad"));
    assert_eq!(state.value("field3"), Some(&json!(42)));
}

#[test]
fn untracked_fields_never_gain_error_keys() {
    let (reducer, state) = setup();
    let state = reducer.reduce(state, change("field3", json!("x"), None));
    let state = flagged(&reducer, state, "field3", "nope");
    let state = reducer.reduce(state, FormIntent::Replace { patch: json!({ "field3": "" }) });

    let field3 = state.get("field3").unwrap();
    assert_eq!(field3.error, None);
    assert_eq!(field3.error_message, None);
}
