//! Action factory: pure signal constructors plus the effects that wrap a
//! transport call between a request-phase signal and a terminal one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::store::Dispatch;
use crate::transport::{Failure, Headers, Method, Outcome, ResponseKind, Transport, TransportRequest};

use super::action::{Action, Key, Params, Payload};
use super::names::ActionTypes;
use super::options::{ResourceOptions, Transform};

/// Builds signals and effects for one resource.
///
/// Holds only immutable configuration plus a shared sequence counter, so
/// clones are cheap and every clone numbers its effects from one series.
pub struct ActionFactory<T> {
    url: String,
    types: Arc<ActionTypes>,
    primary_key: String,
    json_body: bool,
    response_kind: ResponseKind,
    headers: Headers,
    list_transform: Option<Transform>,
    item_transform: Option<Transform>,
    transport: Arc<T>,
    sequence: Arc<AtomicU64>,
}

impl<T> Clone for ActionFactory<T> {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            types: self.types.clone(),
            primary_key: self.primary_key.clone(),
            json_body: self.json_body,
            response_kind: self.response_kind,
            headers: self.headers.clone(),
            list_transform: self.list_transform.clone(),
            item_transform: self.item_transform.clone(),
            transport: self.transport.clone(),
            sequence: self.sequence.clone(),
        }
    }
}

impl<T> ActionFactory<T> {
    pub fn new(options: &ResourceOptions, transport: Arc<T>) -> Self {
        let config = &options.config;
        Self {
            url: config.url.trim_end_matches('/').to_string(),
            types: Arc::new(config.action_types()),
            primary_key: config.primary_key.clone(),
            json_body: config.json_body,
            response_kind: config.response_kind,
            headers: options.headers.clone(),
            list_transform: options.list_transform.clone(),
            item_transform: options.item_transform.clone(),
            transport,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Vocabulary shared with the reducer built for this resource.
    pub fn types(&self) -> &Arc<ActionTypes> {
        &self.types
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn request_list(&self, params: Option<Params>) -> Action {
        Action::new(&self.types.request, Payload::ListRequest { params })
    }

    pub fn receive_list(&self, params: Option<Params>, data: Value) -> Action {
        let data = apply(self.list_transform.as_ref(), data);
        Action::new(&self.types.receive, Payload::ListReceived { params, data })
    }

    pub fn receive_list_error(&self, params: Option<Params>, failure: Failure) -> Action {
        Action::new(
            &self.types.receive_error,
            Payload::ListError {
                params,
                error: failure.error,
                raw: failure.raw,
            },
        )
    }

    pub fn request_one(&self, id: Key) -> Action {
        Action::new(&self.types.request_one, Payload::ItemRequest { id })
    }

    pub fn receive_one(&self, id: Key, data: Value) -> Action {
        let data = apply(self.item_transform.as_ref(), data);
        Action::new(&self.types.receive_one, Payload::ItemReceived { id, data })
    }

    pub fn receive_one_error(&self, id: Key, failure: Failure) -> Action {
        Action::new(
            &self.types.receive_one_error,
            Payload::ItemError {
                id,
                error: failure.error,
                raw: failure.raw,
            },
        )
    }

    pub fn saving(&self, id: Option<Key>) -> Action {
        Action::new(&self.types.saving, Payload::Saving { id })
    }

    pub fn saved(&self, id: Option<Key>, data: Value) -> Action {
        Action::new(&self.types.saved, Payload::Saved { id, data })
    }

    pub fn save_error(&self, id: Option<Key>, failure: Failure) -> Action {
        Action::new(
            &self.types.save_error,
            Payload::SaveError {
                id,
                error: failure.error,
                raw: failure.raw,
            },
        )
    }

    pub fn deleting(&self, id: Key) -> Action {
        Action::new(&self.types.deleting, Payload::Deleting { id })
    }

    pub fn deleted(&self, id: Key, data: Value) -> Action {
        Action::new(
            &self.types.deleted,
            Payload::Deleted {
                id,
                data: Some(data),
            },
        )
    }

    pub fn delete_error(&self, id: Key, failure: Failure) -> Action {
        Action::new(
            &self.types.delete_error,
            Payload::DeleteError {
                id,
                error: failure.error,
                raw: failure.raw,
            },
        )
    }

    /// Global reset signal. No network call is involved.
    pub fn reset_all(&self) -> Action {
        Action::new(&self.types.reset_all, Payload::Empty)
    }

    fn item_url(&self, id: &Key) -> String {
        format!("{}/{}", self.url, id)
    }

    fn request(&self, url: String, method: Method, params: Option<Value>) -> TransportRequest {
        TransportRequest {
            url,
            method,
            params,
            json_body: self.json_body,
            headers: Vec::new(),
            response_kind: self.response_kind,
        }
    }

    fn effect(&self, opening: Action, request: TransportRequest, completion: Completion) -> Effect<T> {
        Effect {
            factory: self.clone(),
            completion,
            opening,
            request,
            request_id: Uuid::new_v4(),
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed) + 1,
        }
    }

    /// Effect reading the collection, optionally filtered by `params`.
    pub fn fetch_list(&self, params: Option<Params>) -> Effect<T> {
        let request = self.request(
            self.url.clone(),
            Method::Read,
            params.clone().map(Value::Object),
        );
        self.effect(
            self.request_list(params.clone()),
            request,
            Completion::List { params },
        )
    }

    /// Effect reading one item at `<url>/<id>`.
    pub fn fetch_one(&self, id: Key) -> Effect<T> {
        let request = self.request(self.item_url(&id), Method::Read, None);
        self.effect(self.request_one(id.clone()), request, Completion::One { id })
    }

    /// Effect creating or updating an item.
    ///
    /// With an id the key is written into `data` under the primary key, the
    /// item URL is targeted and the method defaults to update; without one
    /// the collection URL is targeted and the method defaults to create.
    pub fn save(&self, mut data: Value, id: Option<Key>, method: Option<Method>) -> Effect<T> {
        let (url, default_method) = match &id {
            Some(id) => {
                if let Value::Object(fields) = &mut data {
                    fields.insert(self.primary_key.clone(), id.to_value());
                }
                (self.item_url(id), Method::Update)
            }
            None => (self.url.clone(), Method::Create),
        };

        let request = self.request(url, method.unwrap_or(default_method), Some(data));
        self.effect(self.saving(id.clone()), request, Completion::Save { id })
    }

    /// Effect deleting the item at `<url>/<id>`.
    pub fn delete(&self, id: Key) -> Effect<T> {
        let request = self.request(self.item_url(&id), Method::Delete, None);
        self.effect(self.deleting(id.clone()), request, Completion::Delete { id })
    }

    fn complete(&self, completion: Completion, outcome: Outcome) -> Action {
        match (completion, outcome) {
            (Completion::List { params }, Ok(data)) => self.receive_list(params, data),
            (Completion::List { params }, Err(failure)) => self.receive_list_error(params, failure),
            (Completion::One { id }, Ok(data)) => self.receive_one(id, data),
            (Completion::One { id }, Err(failure)) => self.receive_one_error(id, failure),
            (Completion::Save { id }, Ok(data)) => self.saved(id, data),
            (Completion::Save { id }, Err(failure)) => self.save_error(id, failure),
            (Completion::Delete { id }, Ok(data)) => self.deleted(id, data),
            (Completion::Delete { id }, Err(failure)) => self.delete_error(id, failure),
        }
    }
}

fn apply(transform: Option<&Transform>, data: Value) -> Value {
    match transform {
        Some(f) => f(data),
        None => data,
    }
}

/// Which terminal signal an effect's outcome turns into.
#[derive(Debug, Clone, PartialEq)]
enum Completion {
    List { params: Option<Params> },
    One { id: Key },
    Save { id: Option<Key> },
    Delete { id: Key },
}

/// Deferred request life-cycle.
///
/// Running it dispatches the request-phase signal before any I/O, performs
/// exactly one transport call, then dispatches exactly one terminal signal.
pub struct Effect<T> {
    factory: ActionFactory<T>,
    completion: Completion,
    opening: Action,
    request: TransportRequest,
    request_id: Uuid,
    sequence: u64,
}

impl<T> Effect<T> {
    /// Signal dispatched before the call starts.
    pub fn opening(&self) -> &Action {
        &self.opening
    }

    /// Request to be sent. Headers are left empty here and resolved when
    /// the effect runs.
    pub fn request(&self) -> &TransportRequest {
        &self.request
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Issue order of this effect among those built by the same factory.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl<T: Transport> Effect<T> {
    /// Run the life-cycle, returning the terminal signal that was dispatched.
    pub async fn run<D: Dispatch + ?Sized>(self, dispatcher: &D) -> Action {
        let span = tracing::debug_span!(
            "effect",
            request_id = %self.request_id,
            seq = self.sequence,
            method = %self.request.method,
            url = %self.request.url,
        );

        let Effect {
            factory,
            completion,
            opening,
            mut request,
            ..
        } = self;

        async move {
            tracing::debug!(kind = opening.kind().unwrap_or_default(), "Request started");
            dispatcher.dispatch(opening);

            request.headers = factory.headers.resolve();
            let outcome = factory.transport.send(request).await;
            let terminal = factory.complete(completion, outcome);

            match terminal.payload().error() {
                Some(error) => tracing::info!(
                    kind = terminal.kind().unwrap_or_default(),
                    error_type = error.error_type(),
                    %error,
                    "Request failed"
                ),
                None => tracing::debug!(kind = terminal.kind().unwrap_or_default(), "Request completed"),
            }

            dispatcher.dispatch(terminal.clone());
            terminal
        }
        .instrument(span)
        .await
    }
}
