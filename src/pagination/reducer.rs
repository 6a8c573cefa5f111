//! Reducer for infinite-scroll pagination.

use std::marker::PhantomData;

use crate::mvi::Reducer;

use super::intent::PaginationIntent;
use super::state::PaginationState;

/// Reducer for pagination state transitions.
pub struct PaginationReducer<T, E>(PhantomData<fn() -> (T, E)>);

impl<T, E> PaginationReducer<T, E> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T, E> Default for PaginationReducer<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Reducer for PaginationReducer<T, E>
where
    T: Clone + PartialEq + Send + 'static,
    E: Clone + PartialEq + Send + 'static,
{
    type State = PaginationState<T, E>;
    type Intent = PaginationIntent<T, E>;

    fn reduce(&self, state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PaginationIntent::FetchStarted => PaginationState {
                loading: true,
                ..state
            },

            PaginationIntent::FetchSucceeded { items } => {
                let mut data = state.data;
                data.extend(items);
                PaginationState {
                    loading: false,
                    counter: state.counter.saturating_add(1),
                    data,
                    error: None,
                }
            }

            // Data and counter are kept so the list stays usable.
            PaginationIntent::FetchFailed { error } => PaginationState {
                loading: false,
                error: Some(error),
                ..state
            },

            PaginationIntent::FetchCancelled => PaginationState {
                loading: false,
                ..state
            },
        }
    }
}
