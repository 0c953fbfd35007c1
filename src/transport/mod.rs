//! Transport adapters.
//!
//! A transport performs exactly one call per [`TransportRequest`] and
//! resolves to exactly one [`Outcome`]. The `Result` return type is what
//! carries the single-terminal-outcome guarantee: there is no way for an
//! implementation to report both, or neither.

mod error;
mod headers;
mod http;
mod timeout;

pub use error::{Failure, TransportError, NETWORK_ERROR};
pub use headers::{bearer, HeaderPair, Headers};
pub use http::HttpTransport;
pub use timeout::TimeoutConfig;

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of one transport call: the decoded success payload, or a failure.
pub type Outcome = Result<Value, Failure>;

/// Operation requested from the remote collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Read,
    Create,
    Update,
    Patch,
    Delete,
}

impl Method {
    /// Methods whose params travel as the request body rather than the query.
    pub fn has_body(self) -> bool {
        matches!(self, Method::Create | Method::Update | Method::Patch)
    }

    pub fn http_method(self) -> reqwest::Method {
        match self {
            Method::Read => reqwest::Method::GET,
            Method::Create => reqwest::Method::POST,
            Method::Update => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Read => "read",
            Method::Create => "create",
            Method::Update => "update",
            Method::Patch => "patch",
            Method::Delete => "delete",
        };
        f.write_str(name)
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "read" | "get" => Ok(Method::Read),
            "create" | "post" => Ok(Method::Create),
            "update" | "put" => Ok(Method::Update),
            "patch" => Ok(Method::Patch),
            "delete" => Ok(Method::Delete),
            other => Err(format!("unknown method '{}'", other)),
        }
    }
}

/// How a response body is decoded into a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    #[default]
    Json,
    Text,
}

impl ResponseKind {
    /// Decode a response body.
    ///
    /// An empty JSON body decodes to `null`. A body that is not valid JSON
    /// is kept as a string so the outcome still depends only on the status.
    pub fn decode(self, body: &str) -> Value {
        match self {
            ResponseKind::Text => Value::String(body.to_string()),
            ResponseKind::Json if body.trim().is_empty() => Value::Null,
            ResponseKind::Json => serde_json::from_str(body).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Response body is not valid JSON, keeping it as text");
                Value::String(body.to_string())
            }),
        }
    }
}

/// Description of one call, produced by the action factory.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub url: String,
    pub method: Method,
    /// Query parameters for read/delete, body for create/update/patch.
    pub params: Option<Value>,
    /// Encode a body as JSON; otherwise it is form-encoded.
    pub json_body: bool,
    pub headers: Vec<HeaderPair>,
    pub response_kind: ResponseKind,
}

impl TransportRequest {
    /// Flatten object params into string pairs for a query or form body.
    ///
    /// Strings are taken verbatim, `null` becomes an empty value, and any
    /// other value uses its JSON rendering. Non-object params yield nothing.
    pub fn param_pairs(&self) -> Vec<(String, String)> {
        match &self.params {
            Some(Value::Object(map)) => pairs(map),
            _ => Vec::new(),
        }
    }
}

fn pairs(map: &Map<String, Value>) -> Vec<(String, String)> {
    map.iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Performs calls on behalf of the action factory.
pub trait Transport: Send + Sync {
    /// Perform one call. Must resolve exactly once.
    fn send(&self, request: TransportRequest) -> impl Future<Output = Outcome> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(&self, request: TransportRequest) -> impl Future<Output = Outcome> + Send {
        (**self).send(request)
    }
}
