//! Failure taxonomy reported by transports.
//!
//! Only two kinds are distinguished: the call never produced a response,
//! or it produced one with a non-success status. Anything richer is left
//! to callers inspecting the raw payload.

use reqwest::StatusCode;
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Message used when a network failure carries no detail of its own.
pub const NETWORK_ERROR: &str = "Network error";

/// Errors a transport call can end with.
///
/// `Display` renders the bare message, so a 404 reads `Not Found`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response was received (connection refused, DNS, timeout...).
    #[error("{message}")]
    Network { message: String },

    /// A response arrived with a status outside the success range.
    #[error("{message}")]
    Application { status: u16, message: String },
}

impl TransportError {
    pub fn network(message: impl Into<String>) -> Self {
        TransportError::Network {
            message: message.into(),
        }
    }

    /// Build an application failure whose message is the status text.
    pub fn from_status(status: u16) -> Self {
        let message = StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));
        TransportError::Application { status, message }
    }

    pub fn message(&self) -> &str {
        match self {
            TransportError::Network { message } | TransportError::Application { message, .. } => {
                message
            }
        }
    }

    /// HTTP status of an application failure.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Network { .. } => None,
            TransportError::Application { status, .. } => Some(*status),
        }
    }

    /// Get error type string for diagnostics
    pub fn error_type(&self) -> &'static str {
        match self {
            TransportError::Network { .. } => "network_failure",
            TransportError::Application { .. } => "application_failure",
        }
    }
}

impl Serialize for TransportError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A failed transport call: the error plus whatever payload came back.
///
/// Network failures carry no payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub error: TransportError,
    pub raw: Option<Value>,
}

impl Failure {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            error: TransportError::network(message),
            raw: None,
        }
    }

    pub fn status(status: u16, raw: Value) -> Self {
        Self {
            error: TransportError::from_status(status),
            raw: Some(raw),
        }
    }
}
