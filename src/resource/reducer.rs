//! Transition table for one resource.
//!
//! Built once per resource: the frozen initial state and a map from
//! signal kind to [`Transition`]. Kinds missing from the map, and signals
//! without a kind, leave the state untouched, so the reducer can sit on a
//! channel shared with unrelated signals.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::mvi::Reducer;

use super::action::{Action, Key};
use super::names::ActionTypes;
use super::operations::CrudOperations;
use super::state::{DeleteState, ResourceState, SaveState};

/// Construction-time settings of a [`ResourceReducer`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReducerOptions {
    pub operations: CrudOperations,
    /// Fold successful saves and deletes into the fetched list.
    pub merge_on_write: bool,
    pub primary_key: String,
    pub initial_data: Option<Vec<Value>>,
}

impl Default for ReducerOptions {
    fn default() -> Self {
        Self {
            operations: CrudOperations::ALL,
            merge_on_write: false,
            primary_key: "id".to_string(),
            initial_data: None,
        }
    }
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    ListRequest,
    ListReceived,
    ListError,
    ItemRequest,
    ItemReceived,
    ItemError,
    Saving,
    Saved,
    SavedMerge,
    SaveError,
    Deleting,
    Deleted,
    DeletedMerge,
    DeleteError,
}

pub struct ResourceReducer {
    types: Arc<ActionTypes>,
    primary_key: String,
    initial: ResourceState,
    handlers: HashMap<String, Transition>,
}

impl ResourceReducer {
    pub fn new(types: Arc<ActionTypes>, options: ReducerOptions) -> Self {
        let ops = options.operations;
        let initial = ResourceState::new(
            options.initial_data.unwrap_or_default(),
            ops.has_save(),
            ops.has_delete(),
        );

        let mut handlers = HashMap::from([
            (types.request.clone(), Transition::ListRequest),
            (types.receive.clone(), Transition::ListReceived),
            (types.receive_error.clone(), Transition::ListError),
            (types.request_one.clone(), Transition::ItemRequest),
            (types.receive_one.clone(), Transition::ItemReceived),
            (types.receive_one_error.clone(), Transition::ItemError),
        ]);

        if ops.has_save() {
            let saved = if options.merge_on_write {
                Transition::SavedMerge
            } else {
                Transition::Saved
            };
            handlers.insert(types.saving.clone(), Transition::Saving);
            handlers.insert(types.saved.clone(), saved);
            handlers.insert(types.save_error.clone(), Transition::SaveError);
        }

        if ops.has_delete() {
            let deleted = if options.merge_on_write {
                Transition::DeletedMerge
            } else {
                Transition::Deleted
            };
            handlers.insert(types.deleting.clone(), Transition::Deleting);
            handlers.insert(types.deleted.clone(), deleted);
            handlers.insert(types.delete_error.clone(), Transition::DeleteError);
        }

        Self {
            types,
            primary_key: options.primary_key,
            initial,
            handlers,
        }
    }

    pub fn types(&self) -> &Arc<ActionTypes> {
        &self.types
    }

    /// Handler installed for `kind`, if any.
    pub fn transition_for(&self, kind: &str) -> Option<Transition> {
        self.handlers.get(kind).copied()
    }

    fn apply(&self, transition: Transition, state: ResourceState, action: &Action) -> ResourceState {
        let payload = action.payload();
        match transition {
            Transition::ListRequest => ResourceState {
                list_loading: true,
                params: payload.params().cloned(),
                data: Value::Array(Vec::new()),
                list_error: None,
                list_error_data: None,
                ..state
            },
            Transition::ListReceived => ResourceState {
                data: payload.data().cloned().unwrap_or(Value::Null),
                list_loading: false,
                list_error: None,
                list_error_data: None,
                ..state
            },
            Transition::ListError => ResourceState {
                list_error: payload.error().cloned(),
                list_error_data: payload.raw().cloned(),
                list_loading: false,
                ..state
            },
            Transition::ItemRequest => ResourceState {
                current_id: None,
                current_data: None,
                one_loading: true,
                one_error: None,
                one_error_data: None,
                ..state
            },
            Transition::ItemReceived => ResourceState {
                current_id: payload.id().cloned(),
                current_data: payload.data().cloned(),
                one_loading: false,
                one_error: None,
                one_error_data: None,
                ..state
            },
            Transition::ItemError => ResourceState {
                one_error: payload.error().cloned(),
                one_error_data: payload.raw().cloned(),
                one_loading: false,
                ..state
            },
            Transition::Saving => ResourceState {
                save: Some(SaveState {
                    is_saving: true,
                    ..SaveState::default()
                }),
                ..state
            },
            Transition::Saved => ResourceState {
                save: Some(saved(payload.data())),
                ..state
            },
            Transition::SavedMerge => {
                let data = match payload.data() {
                    Some(item) => merge_saved(state.data, payload.id(), item, &self.primary_key),
                    None => state.data,
                };
                ResourceState {
                    data,
                    save: Some(saved(payload.data())),
                    ..state
                }
            }
            Transition::SaveError => {
                let mut save = state.save.unwrap_or_default();
                save.save_error = payload.error().cloned();
                save.save_error_data = payload.raw().cloned();
                save.is_saving = false;
                ResourceState {
                    save: Some(save),
                    ..state
                }
            }
            Transition::Deleting => ResourceState {
                delete: Some(DeleteState {
                    is_deleting: true,
                    ..DeleteState::default()
                }),
                ..state
            },
            Transition::Deleted => ResourceState {
                delete: Some(DeleteState::default()),
                ..state
            },
            Transition::DeletedMerge => {
                let data = match payload.id() {
                    Some(id) => merge_deleted(state.data, id, &self.primary_key),
                    None => state.data,
                };
                ResourceState {
                    data,
                    delete: Some(DeleteState::default()),
                    ..state
                }
            }
            Transition::DeleteError => ResourceState {
                delete: Some(DeleteState {
                    is_deleting: false,
                    delete_error: payload.error().cloned(),
                    delete_error_data: payload.raw().cloned(),
                }),
                ..state
            },
        }
    }
}

impl Reducer for ResourceReducer {
    type State = ResourceState;
    type Intent = Action;

    fn initial_state(&self) -> ResourceState {
        self.initial.clone()
    }

    fn reduce(&self, state: ResourceState, action: &Action) -> ResourceState {
        let Some(kind) = action.kind() else {
            return state;
        };

        if kind == self.types.reset_all {
            return self.initial.clone();
        }

        match self.handlers.get(kind) {
            Some(&transition) => self.apply(transition, state, action),
            None => state,
        }
    }
}

fn saved(data: Option<&Value>) -> SaveState {
    SaveState {
        is_saving: false,
        saved_data: data.cloned(),
        save_error: None,
        save_error_data: None,
    }
}

/// Replace the items matching `id`, or append when there is no id.
///
/// An id that matches nothing leaves the list as it was.
fn merge_saved(data: Value, id: Option<&Key>, item: &Value, primary_key: &str) -> Value {
    match (data, id) {
        (Value::Array(items), Some(id)) => {
            let matched = items.iter().any(|existing| id.identifies(existing, primary_key));
            if !matched {
                tracing::debug!(%id, "Saved item is not in the fetched list, list left unchanged");
            }
            Value::Array(
                items
                    .into_iter()
                    .map(|existing| {
                        if id.identifies(&existing, primary_key) {
                            item.clone()
                        } else {
                            existing
                        }
                    })
                    .collect(),
            )
        }
        (Value::Array(mut items), None) => {
            items.push(item.clone());
            Value::Array(items)
        }
        (other, _) => {
            tracing::warn!("List data is not a sequence, saved item not merged");
            other
        }
    }
}

fn merge_deleted(data: Value, id: &Key, primary_key: &str) -> Value {
    match data {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|item| !id.identifies(item, primary_key))
                .collect(),
        ),
        other => {
            tracing::warn!(%id, "List data is not a sequence, deleted item not merged");
            other
        }
    }
}
