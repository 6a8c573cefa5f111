//! Per-field change and blur handlers.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use super::field::Input;
use super::intent::FormIntent;
use super::FormStore;

/// Which callback of a field definition a handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// Uses `on_change`.
    Change,
    /// Uses `on_blur`.
    Blur,
}

/// Handler bound to one field of a form.
///
/// Cheap to clone; clones share identity (see [`Handler::ptr_eq`]).
#[derive(Clone)]
pub struct Handler {
    field: Arc<str>,
    callback: Arc<dyn Fn(Input) + Send + Sync>,
}

impl Handler {
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Feed a raw value or an input event to the form.
    pub fn call(&self, input: impl Into<Input>) {
        (self.callback)(input.into());
    }

    pub fn ptr_eq(&self, other: &Handler) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&self.field).finish()
    }
}

/// Handlers of a form, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct Handlers(BTreeMap<String, Handler>);

impl Handlers {
    pub fn get(&self, field: &str) -> Option<&Handler> {
        self.0.get(field)
    }

    /// Call the handler of `field`. Returns false if there is no such field.
    pub fn call(&self, field: &str, input: impl Into<Input>) -> bool {
        match self.0.get(field) {
            Some(handler) => {
                handler.call(input);
                true
            }
            None => {
                tracing::warn!(field = %field, "No handler for unknown field");
                false
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Handler)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<&str> for Handlers {
    type Output = Handler;

    fn index(&self, field: &str) -> &Handler {
        match self.0.get(field) {
            Some(handler) => handler,
            None => panic!("no handler for field '{field}'"),
        }
    }
}

/// Build one handler per field. Debounced fields go through the form's
/// debouncer, the rest dispatch synchronously.
pub(super) fn build_handlers(store: &Arc<FormStore>, kind: HandlerKind) -> Handlers {
    let handlers = store
        .registry
        .definitions()
        .map(|(name, definition)| {
            let transform = match kind {
                HandlerKind::Change => definition.on_change.clone(),
                HandlerKind::Blur => definition.on_blur.clone(),
            };
            let debounced = definition.without_input_value;
            let weak = Arc::downgrade(store);
            let field = name.clone();

            let callback = move |input: Input| {
                let Some(store) = weak.upgrade() else {
                    tracing::warn!(field = %field, ?kind, "Handler called after form was dropped");
                    return;
                };
                let intent = FormIntent::Change {
                    field: field.clone(),
                    input,
                    transform: transform.clone(),
                };
                if debounced {
                    tracing::trace!(field = %field, ?kind, "Debouncing field update");
                    store.dispatch_debounced(field.clone(), intent);
                } else {
                    store.dispatch(intent);
                }
            };

            let handler = Handler {
                field: Arc::from(name.as_str()),
                callback: Arc::new(callback),
            };
            (name.clone(), handler)
        })
        .collect();
    Handlers(handlers)
}
