//! Reducer trait for MVI architecture.

use super::intent::Intent;
use super::state::UiState;

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be total: every `(State, Intent)` pair yields a state, and
/// malformed intents leave the state unchanged instead of failing.
///
/// Reducers may carry read-only context fixed at construction (for
/// example the default error messages of a form); they never hold the
/// state itself.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state.
    fn reduce(&self, state: Self::State, intent: Self::Intent) -> Self::State;
}
