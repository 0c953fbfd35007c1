use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resource::{CrudOperations, DEFAULT_RESET_KIND};
use crate::transport::ResponseKind;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub transport: TransportSettings,
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

/// Settings of the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportSettings {
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// One remote collection and how its signals and state are shaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Singular signal name (e.g., "WIDGET").
    pub name: String,
    /// Collection endpoint (e.g., "https://api.example.com/widgets").
    pub url: String,
    /// Plural signal name; defaults to `<name>S`.
    #[serde(default)]
    pub plural: Option<String>,
    /// Field identifying an item (default: "id").
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    /// Send write bodies as JSON instead of form fields.
    #[serde(default)]
    pub json_body: bool,
    #[serde(default)]
    pub response_kind: ResponseKind,
    /// Enabled operations as a letter set (default: "CRUD").
    #[serde(default)]
    pub operations: CrudOperations,
    /// Global reset signal kind (default: "RESET_ALL_DATA").
    #[serde(default = "default_reset_kind")]
    pub reset_kind: String,
    /// Fold successful saves and deletes into the fetched list.
    #[serde(default)]
    pub merge_on_write: bool,
    /// List contents before anything has been fetched.
    #[serde(default)]
    pub initial_data: Option<Vec<Value>>,
    /// Static headers sent with every request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_primary_key() -> String {
    "id".to_string()
}

fn default_reset_kind() -> String {
    DEFAULT_RESET_KIND.to_string()
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl ResourceConfig {
    /// Resource with every option at its default.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            plural: None,
            primary_key: default_primary_key(),
            json_body: false,
            response_kind: ResponseKind::default(),
            operations: CrudOperations::default(),
            reset_kind: default_reset_kind(),
            merge_on_write: false,
            initial_data: None,
            headers: BTreeMap::new(),
        }
    }
}
