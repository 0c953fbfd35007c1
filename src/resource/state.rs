//! View state of one resource type.

use serde::Serialize;
use serde_json::Value;

use crate::mvi::ViewState;
use crate::transport::TransportError;

use super::action::{Key, Params};

/// Save concern, present only when create or update is enabled.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveState {
    pub is_saving: bool,
    pub saved_data: Option<Value>,
    pub save_error: Option<TransportError>,
    pub save_error_data: Option<Value>,
}

/// Delete concern, present only when delete is enabled.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteState {
    pub is_deleting: bool,
    pub delete_error: Option<TransportError>,
    pub delete_error_data: Option<Value>,
}

/// Everything a consumer reads about one resource.
///
/// Replaced as a whole on every delivered signal, never patched in place
/// by anything other than the reducer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceState {
    /// Last fetched list, or whatever the list transform produced.
    pub data: Value,
    /// Query of the last list request.
    pub params: Option<Params>,
    pub list_loading: bool,
    pub list_error: Option<TransportError>,
    pub list_error_data: Option<Value>,

    pub current_id: Option<Key>,
    pub current_data: Option<Value>,
    pub one_loading: bool,
    pub one_error: Option<TransportError>,
    pub one_error_data: Option<Value>,

    #[serde(flatten)]
    pub save: Option<SaveState>,
    #[serde(flatten)]
    pub delete: Option<DeleteState>,
}

impl ViewState for ResourceState {}

impl ResourceState {
    /// Fresh state holding `data` as the list, with the optional concerns
    /// present according to `with_save` / `with_delete`.
    pub fn new(data: Vec<Value>, with_save: bool, with_delete: bool) -> Self {
        Self {
            data: Value::Array(data),
            params: None,
            list_loading: false,
            list_error: None,
            list_error_data: None,
            current_id: None,
            current_data: None,
            one_loading: false,
            one_error: None,
            one_error_data: None,
            save: with_save.then(SaveState::default),
            delete: with_delete.then(DeleteState::default),
        }
    }

    /// List data as items, when it is still a sequence.
    pub fn items(&self) -> Option<&[Value]> {
        self.data.as_array().map(Vec::as_slice)
    }

    pub fn is_saving(&self) -> bool {
        self.save.as_ref().is_some_and(|s| s.is_saving)
    }

    pub fn is_deleting(&self) -> bool {
        self.delete.as_ref().is_some_and(|d| d.is_deleting)
    }

    /// Any request still waiting for its outcome.
    pub fn is_busy(&self) -> bool {
        self.list_loading || self.one_loading || self.is_saving() || self.is_deleting()
    }

    /// First error recorded across all concerns.
    pub fn first_error(&self) -> Option<&TransportError> {
        self.list_error
            .as_ref()
            .or(self.one_error.as_ref())
            .or(self.save.as_ref().and_then(|s| s.save_error.as_ref()))
            .or(self.delete.as_ref().and_then(|d| d.delete_error.as_ref()))
    }
}

impl Default for ResourceState {
    fn default() -> Self {
        Self::new(Vec::new(), true, true)
    }
}
