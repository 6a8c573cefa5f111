//! State for infinite-scroll pagination.

use crate::mvi::UiState;

/// Everything a paginated list needs to render.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState<T, E> {
    /// A fetch is in flight.
    pub loading: bool,
    /// Page counter, incremented after every successful fetch.
    pub counter: u32,
    /// Items loaded so far.
    pub data: Vec<T>,
    /// Last fetch failure, cleared by the next success.
    pub error: Option<E>,
}

impl<T, E> Default for PaginationState<T, E> {
    fn default() -> Self {
        Self {
            loading: false,
            counter: 1,
            data: Vec::new(),
            error: None,
        }
    }
}

impl<T, E> UiState for PaginationState<T, E>
where
    T: Clone + PartialEq + Send + 'static,
    E: Clone + PartialEq + Send + 'static,
{
}

impl<T, E> PaginationState<T, E> {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}
