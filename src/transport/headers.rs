//! Request header construction.
//!
//! Headers are either fixed at construction or produced by a function
//! evaluated for every call, which lets rotating credentials reach each
//! request without rebuilding the factory.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Header name and value.
pub type HeaderPair = (String, String);

type HeaderFn = dyn Fn() -> Vec<HeaderPair> + Send + Sync;

#[derive(Clone)]
pub enum Headers {
    Static(Vec<HeaderPair>),
    Dynamic(Arc<HeaderFn>),
}

impl Headers {
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> Vec<HeaderPair> + Send + Sync + 'static,
    {
        Headers::Dynamic(Arc::new(f))
    }

    /// Headers for the call being issued now.
    pub fn resolve(&self) -> Vec<HeaderPair> {
        match self {
            Headers::Static(pairs) => pairs.clone(),
            Headers::Dynamic(f) => f(),
        }
    }
}

impl Default for Headers {
    fn default() -> Self {
        Headers::Static(Vec::new())
    }
}

impl From<&BTreeMap<String, String>> for Headers {
    fn from(map: &BTreeMap<String, String>) -> Self {
        Headers::Static(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Headers::Static(pairs) => {
                // Values may hold credentials.
                let names: Vec<&str> = pairs.iter().map(|(name, _)| name.as_str()).collect();
                f.debug_tuple("Static").field(&names).finish()
            }
            Headers::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// `Authorization: Bearer <token>` header pair.
pub fn bearer(token: &str) -> HeaderPair {
    ("Authorization".to_string(), format!("Bearer {}", token))
}
