//! Keyed trailing debounce on the tokio runtime.
//!
//! Each call schedules its task after a quiet period. A newer call for the
//! same key aborts the pending one, so only the last call inside the window
//! runs. Calls for different keys do not interfere.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Default quiet period for debounced form fields.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Errors that can occur when creating a debouncer.
#[derive(Debug, Error)]
pub enum DebounceError {
    #[error("No tokio runtime available to schedule debounced tasks")]
    NoRuntime,
}

/// Schedules delayed tasks, coalescing calls per key.
///
/// Dropping the debouncer aborts every pending task.
pub struct Debouncer<K> {
    delay: Duration,
    runtime: Handle,
    pending: Mutex<HashMap<K, JoinHandle<()>>>,
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + std::fmt::Debug + Send + 'static,
{
    pub fn new(delay: Duration, runtime: Handle) -> Self {
        Self {
            delay,
            runtime,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Create a debouncer on the runtime of the calling context.
    pub fn try_current(delay: Duration) -> Result<Self, DebounceError> {
        let runtime = Handle::try_current().map_err(|_| DebounceError::NoRuntime)?;
        Ok(Self::new(delay, runtime))
    }

    /// Run `task` once `delay` has passed without another call for `key`.
    pub fn call<F>(&self, key: K, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        // Spawn under the lock so insertion order matches call order.
        let mut pending = self.pending.lock();
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });

        pending.retain(|_, h| !h.is_finished());
        if let Some(previous) = pending.insert(key.clone(), handle) {
            previous.abort();
            tracing::trace!(key = ?key, "Debounced call superseded");
        }
    }

    /// Abort the pending task for `key`, if any.
    pub fn cancel(&self, key: &K) -> bool {
        match self.pending.lock().remove(key) {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    /// Number of keys with a task still waiting to run.
    pub fn pending(&self) -> usize {
        self.pending
            .lock()
            .values()
            .filter(|h| !h.is_finished())
            .count()
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        for (_, handle) in self.pending.get_mut().drain() {
            handle.abort();
        }
    }
}
