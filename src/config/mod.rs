//! Configuration for resources and the HTTP transport.
//!
//! Resources are declared in a TOML file; runtime-only options such as
//! header functions and data transforms are attached afterwards through
//! [`crate::resource::ResourceOptions`].

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, ResourceConfig, TransportSettings};
