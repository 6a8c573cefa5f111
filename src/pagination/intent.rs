//! Intents for infinite-scroll pagination.

use crate::mvi::Intent;

/// Intents that can be dispatched to the pagination reducer.
#[derive(Debug, Clone)]
pub enum PaginationIntent<T, E> {
    /// The bottom of the container was reached and a fetch started.
    FetchStarted,

    /// The fetch resolved with a new page of items.
    FetchSucceeded { items: Vec<T> },

    /// The fetch was rejected.
    FetchFailed { error: E },

    /// The scroll handler was dropped before the fetch resolved.
    FetchCancelled,
}

impl<T: Send + 'static, E: Send + 'static> Intent for PaginationIntent<T, E> {}
