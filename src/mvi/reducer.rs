//! Reducer trait for MVI architecture.

use super::intent::Intent;
use super::state::ViewState;

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Intent) -> State. Configuration
/// captured at construction time is reachable through `&self`, but the
/// reducer itself never changes after it is built.
pub trait Reducer: Send + Sync {
    /// The state type this reducer operates on.
    type State: ViewState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// State the owning store starts from.
    fn initial_state(&self) -> Self::State;

    /// Process an intent and return the new state.
    ///
    /// Intents the reducer does not recognise must return `state` unchanged.
    fn reduce(&self, state: Self::State, intent: &Self::Intent) -> Self::State;
}
