//! Field registry: normalizes definitions into the initial form state.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::field::{FieldDefinition, FieldState, FormState};

/// Default error message per field, captured once at initialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorMessageRegistry(BTreeMap<String, String>);

impl ErrorMessageRegistry {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Owns the field definitions of one form.
///
/// The initial state and the message registry are computed on first
/// access and cached for the lifetime of the registry.
#[derive(Debug)]
pub struct FieldRegistry {
    definitions: BTreeMap<String, FieldDefinition>,
    initial: OnceLock<(FormState, ErrorMessageRegistry)>,
}

impl FieldRegistry {
    pub fn new(definitions: BTreeMap<String, FieldDefinition>) -> Self {
        Self {
            definitions,
            initial: OnceLock::new(),
        }
    }

    pub fn definition(&self, field: &str) -> Option<&FieldDefinition> {
        self.definitions.get(field)
    }

    pub fn definitions(&self) -> impl Iterator<Item = (&String, &FieldDefinition)> {
        self.definitions.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.definitions.keys()
    }

    pub fn has_debounced_fields(&self) -> bool {
        self.definitions.values().any(|d| d.without_input_value)
    }

    pub fn initial_state(&self) -> &FormState {
        &self.initialize().0
    }

    pub fn error_messages(&self) -> &ErrorMessageRegistry {
        &self.initialize().1
    }

    fn initialize(&self) -> &(FormState, ErrorMessageRegistry) {
        self.initial.get_or_init(|| {
            let state: FormState = self
                .definitions
                .iter()
                .map(|(name, def)| {
                    let field = FieldState {
                        value: def.value.clone(),
                        error: def.error,
                        error_message: def.error_message.clone(),
                    };
                    (name.clone(), field)
                })
                .collect();

            let messages: BTreeMap<String, String> = self
                .definitions
                .iter()
                .filter_map(|(name, def)| {
                    def.error_message
                        .as_ref()
                        .filter(|m| !m.is_empty())
                        .map(|m| (name.clone(), m.clone()))
                })
                .collect();

            tracing::debug!(fields = self.definitions.len(), "Form state initialized");
            (state, ErrorMessageRegistry(messages))
        })
    }
}
