use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::ResourceConfig;
use crate::transport::Headers;

use super::reducer::ReducerOptions;

/// Pure function reshaping a raw success payload.
pub type Transform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Everything needed to build a resource: the serializable config plus
/// runtime-only pieces that cannot live in a file.
#[derive(Clone)]
pub struct ResourceOptions {
    pub config: ResourceConfig,
    pub headers: Headers,
    pub list_transform: Option<Transform>,
    pub item_transform: Option<Transform>,
}

impl ResourceOptions {
    pub fn new(config: ResourceConfig) -> Self {
        let headers = Headers::from(&config.headers);
        Self {
            config,
            headers,
            list_transform: None,
            item_transform: None,
        }
    }

    /// Replace the headers taken from the config file.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Applied to every successful list payload before it is stored.
    pub fn with_list_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.list_transform = Some(Arc::new(f));
        self
    }

    /// Applied to every successful single-item payload before it is stored.
    pub fn with_item_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.item_transform = Some(Arc::new(f));
        self
    }

    pub fn reducer_options(&self) -> ReducerOptions {
        ReducerOptions {
            operations: self.config.operations,
            merge_on_write: self.config.merge_on_write,
            primary_key: self.config.primary_key.clone(),
            initial_data: self.config.initial_data.clone(),
        }
    }
}

impl From<ResourceConfig> for ResourceOptions {
    fn from(config: ResourceConfig) -> Self {
        Self::new(config)
    }
}

impl fmt::Debug for ResourceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceOptions")
            .field("config", &self.config)
            .field("headers", &self.headers)
            .field("list_transform", &self.list_transform.is_some())
            .field("item_transform", &self.item_transform.is_some())
            .finish()
    }
}
