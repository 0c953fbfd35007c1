//! Client-side synchronization of remote collections.
//!
//! Each resource type gets a signal vocabulary, an action factory that
//! wraps transport calls into request life-cycles, and a pure reducer
//! that folds those signals into an immutable view state.

pub mod cli;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod resource;
pub mod store;
pub mod transport;
