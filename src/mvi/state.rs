//! Base trait for view state in MVI architecture.

/// Marker trait for view state objects.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (everything a consumer needs to render)
/// - Comparable (PartialEq for detecting changes)
pub trait ViewState: Clone + PartialEq + Send + 'static {}
