//! Signals exchanged between the action factory, the channel and the reducer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::mvi::Intent;
use crate::transport::TransportError;

/// Query parameters of a list request.
pub type Params = Map<String, Value>;

/// Primary-key value of an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// Whether `value` identifies the same item as this key.
    ///
    /// Numbers and their decimal string form are treated as equal, so a
    /// key typed on a command line still matches a numeric id in a list.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Key::Int(key), Value::Number(n)) => n.as_i64() == Some(*key),
            (Key::Int(key), Value::String(s)) => s.parse::<i64>().ok() == Some(*key),
            (Key::Str(key), Value::String(s)) => key == s,
            (Key::Str(key), Value::Number(n)) => n
                .as_i64()
                .is_some_and(|n| key.parse::<i64>().ok() == Some(n)),
            _ => false,
        }
    }

    /// Whether `item` carries this key under `primary_key`.
    pub fn identifies(&self, item: &Value, primary_key: &str) -> bool {
        item.get(primary_key).is_some_and(|value| self.matches(value))
    }

    pub fn to_value(&self) -> Value {
        match self {
            Key::Int(n) => Value::from(*n),
            Key::Str(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{}", n),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>().map(Key::Int).unwrap_or_else(|_| Key::Str(s.to_string())))
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

/// Kind-specific fields of a signal.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    ListRequest {
        params: Option<Params>,
    },
    ListReceived {
        params: Option<Params>,
        data: Value,
    },
    ListError {
        params: Option<Params>,
        error: TransportError,
        raw: Option<Value>,
    },
    ItemRequest {
        id: Key,
    },
    ItemReceived {
        id: Key,
        data: Value,
    },
    ItemError {
        id: Key,
        error: TransportError,
        raw: Option<Value>,
    },
    Saving {
        id: Option<Key>,
    },
    Saved {
        id: Option<Key>,
        data: Value,
    },
    SaveError {
        id: Option<Key>,
        error: TransportError,
        raw: Option<Value>,
    },
    Deleting {
        id: Key,
    },
    Deleted {
        id: Key,
        data: Option<Value>,
    },
    DeleteError {
        id: Key,
        error: TransportError,
        raw: Option<Value>,
    },
}

impl Payload {
    pub fn params(&self) -> Option<&Params> {
        match self {
            Payload::ListRequest { params }
            | Payload::ListReceived { params, .. }
            | Payload::ListError { params, .. } => params.as_ref(),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<&Key> {
        match self {
            Payload::ItemRequest { id }
            | Payload::ItemReceived { id, .. }
            | Payload::ItemError { id, .. }
            | Payload::Deleting { id }
            | Payload::Deleted { id, .. }
            | Payload::DeleteError { id, .. } => Some(id),
            Payload::Saving { id } | Payload::Saved { id, .. } | Payload::SaveError { id, .. } => {
                id.as_ref()
            }
            _ => None,
        }
    }

    /// Success payload carried by a terminal signal.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Payload::ListReceived { data, .. }
            | Payload::ItemReceived { data, .. }
            | Payload::Saved { data, .. } => Some(data),
            Payload::Deleted { data, .. } => data.as_ref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&TransportError> {
        match self {
            Payload::ListError { error, .. }
            | Payload::ItemError { error, .. }
            | Payload::SaveError { error, .. }
            | Payload::DeleteError { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Raw payload returned alongside a failure.
    pub fn raw(&self) -> Option<&Value> {
        match self {
            Payload::ListError { raw, .. }
            | Payload::ItemError { raw, .. }
            | Payload::SaveError { raw, .. }
            | Payload::DeleteError { raw, .. } => raw.as_ref(),
            _ => None,
        }
    }
}

/// A state-transition signal.
///
/// The kind selects the reducer handler; a signal without a kind, or with
/// a kind no reducer knows, passes through every reducer unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    kind: Option<String>,
    payload: Payload,
}

impl Action {
    pub fn new(kind: impl Into<String>, payload: Payload) -> Self {
        Self {
            kind: Some(kind.into()),
            payload,
        }
    }

    /// A signal carrying no kind at all.
    pub fn untyped(payload: Payload) -> Self {
        Self {
            kind: None,
            payload,
        }
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Whether this signal ends a request life-cycle with a failure.
    pub fn is_failure(&self) -> bool {
        self.payload.error().is_some()
    }
}

impl Intent for Action {}
