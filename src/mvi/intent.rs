//! Base trait for intents (state-transition signals).

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Request-phase signals emitted before any I/O starts
/// - Terminal signals built from a transport outcome
/// - Global signals such as a full reset
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
