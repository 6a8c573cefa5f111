//! Form state management.
//!
//! [`UseForm`] owns the state of one form: field values, per-field error
//! flags and messages, cached change/blur handlers and the submit/error
//! callbacks. Every mutation goes through [`FormReducer`].
//!
//! ```text
//! UI event ─→ Handler ─┬─────────────→ FormReducer ─→ FormState
//!                      └─ Debouncer ──↗
//! ```

mod actions;
mod dispatcher;
mod field;
mod intent;
mod reducer;
mod registry;
mod validator;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use thiserror::Error;

use crate::debounce::{DebounceError, Debouncer, DEFAULT_DEBOUNCE};
use crate::mvi::Reducer;

pub use dispatcher::{Handler, HandlerKind, Handlers};
pub use field::{
    is_truthy, ChangeFn, FieldCheck, FieldDefinition, FieldState, FieldValidator, FormState,
    Input, InputEvent, Transform,
};
pub use intent::FormIntent;
pub use reducer::FormReducer;
pub use registry::{ErrorMessageRegistry, FieldRegistry};
pub use validator::{find_errors, FieldFailure};

/// Errors that can occur when creating a form.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Form has debounced fields but cannot schedule them: {0}")]
    Debounce(#[from] DebounceError),
}

type SubmitFn = dyn Fn(&FormState) + Send + Sync;
type ErrorFn = dyn Fn(&FormState, &[Value]) -> Option<BTreeMap<String, String>> + Send + Sync;

/// Tunables for a form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOptions {
    /// Quiet period for fields with `without_input_value` set.
    pub debounce: Duration,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Everything needed to create a [`UseForm`].
#[derive(Default)]
pub struct FormArgs {
    pub fields: BTreeMap<String, FieldDefinition>,
    pub on_submit: Option<Arc<SubmitFn>>,
    pub on_error: Option<Arc<ErrorFn>>,
    pub options: FormOptions,
}

impl FormArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: BTreeMap<String, FieldDefinition>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn field(mut self, name: impl Into<String>, definition: FieldDefinition) -> Self {
        self.fields.insert(name.into(), definition);
        self
    }

    pub fn on_submit<F>(mut self, f: F) -> Self
    where
        F: Fn(&FormState) + Send + Sync + 'static,
    {
        self.on_submit = Some(Arc::new(f));
        self
    }

    /// Callback for externally reported errors (e.g. a rejected submit).
    ///
    /// Returning a map of field name to message flags those fields.
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&FormState, &[Value]) -> Option<BTreeMap<String, String>> + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(f));
        self
    }

    pub fn options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }
}

impl fmt::Debug for FormArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormArgs")
            .field("fields", &self.fields)
            .field("on_submit", &self.on_submit.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("options", &self.options)
            .finish()
    }
}

/// Shared core of a form. Handlers and debounced tasks hold it weakly.
struct FormStore {
    registry: FieldRegistry,
    reducer: FormReducer,
    state: Mutex<FormState>,
    debouncer: Option<Debouncer<String>>,
    on_submit: Option<Arc<SubmitFn>>,
    on_error: Option<Arc<ErrorFn>>,
}

impl FormStore {
    fn snapshot(&self) -> FormState {
        self.state.lock().clone()
    }

    /// Apply an intent. Change transforms run on a snapshot before the
    /// lock is taken, so they may call back into the form.
    fn dispatch(&self, intent: FormIntent) {
        tracing::trace!(field = ?intent.field(), "Dispatching form intent");
        let intent = match intent {
            FormIntent::Change {
                field,
                input,
                transform: Some(transform),
            } => {
                let snapshot = self.snapshot();
                let outcome = if snapshot.contains(&field) {
                    transform.call(input.value(), &snapshot, input.event())
                } else {
                    Transform::Unchanged
                };
                FormIntent::Resolved {
                    field,
                    input,
                    outcome,
                }
            }
            other => other,
        };

        let mut guard = self.state.lock();
        let next = self.reducer.reduce(guard.clone(), intent);
        *guard = next;
    }

    /// Defer a change until the field has been quiet for the debounce delay.
    fn dispatch_debounced(self: &Arc<Self>, field: String, intent: FormIntent) {
        let Some(debouncer) = &self.debouncer else {
            self.dispatch(intent);
            return;
        };

        let weak = Arc::downgrade(self);
        let key = field.clone();
        debouncer.call(key, move || match weak.upgrade() {
            Some(store) => store.dispatch(intent),
            None => tracing::debug!(field = %field, "Skipping debounced update for dropped form"),
        });
    }
}

/// State and handlers of one form.
///
/// Created once per form; handler maps are built at construction and keep
/// their identity for the lifetime of the form.
pub struct UseForm {
    store: Arc<FormStore>,
    handlers: Handlers,
    blurs: Handlers,
}

impl UseForm {
    /// Create a form from its field definitions and callbacks.
    ///
    /// # Errors
    /// Returns [`FormError::Debounce`] if a field is debounced and no tokio
    /// runtime is available in the calling context.
    pub fn new(args: FormArgs) -> Result<Self, FormError> {
        let FormArgs {
            fields,
            on_submit,
            on_error,
            options,
        } = args;

        let registry = FieldRegistry::new(fields);
        let debouncer = if registry.has_debounced_fields() {
            Some(Debouncer::try_current(options.debounce)?)
        } else {
            None
        };
        let reducer = FormReducer::new(registry.error_messages().clone());
        let state = Mutex::new(registry.initial_state().clone());

        let store = Arc::new(FormStore {
            registry,
            reducer,
            state,
            debouncer,
            on_submit,
            on_error,
        });
        let handlers = dispatcher::build_handlers(&store, HandlerKind::Change);
        let blurs = dispatcher::build_handlers(&store, HandlerKind::Blur);

        tracing::debug!(
            fields = store.registry.names().count(),
            debounce_ms = options.debounce.as_millis() as u64,
            "Form created"
        );

        Ok(Self {
            store,
            handlers,
            blurs,
        })
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FormState {
        self.store.snapshot()
    }

    pub fn field(&self, name: &str) -> Option<FieldState> {
        self.store.state.lock().get(name).cloned()
    }

    pub fn value(&self, name: &str) -> Option<Value> {
        self.store.state.lock().value(name).cloned()
    }

    /// Change handlers, one per field.
    pub fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    /// Blur handlers, one per field.
    pub fn blurs(&self) -> &Handlers {
        &self.blurs
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.store.registry
    }

    /// Apply an intent immediately, bypassing handlers.
    pub fn dispatch(&self, intent: FormIntent) {
        self.store.dispatch(intent);
    }

    /// Number of debounced updates still waiting to land.
    pub fn pending_updates(&self) -> usize {
        self.store.debouncer.as_ref().map_or(0, Debouncer::pending)
    }
}

impl fmt::Debug for UseForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UseForm")
            .field("state", &self.store.snapshot())
            .finish_non_exhaustive()
    }
}
