//! List + detail + save + delete state handling for one remote collection.
//!
//! - [`ActionTypes`]: signal kinds derived from the resource name
//! - [`ActionFactory`]: signal constructors and request [`Effect`]s
//! - [`ResourceReducer`]: the transition table folding signals into
//!   [`ResourceState`]
//! - [`Resource`]: a factory and a store wired to the same vocabulary

mod action;
mod factory;
mod names;
mod operations;
mod options;
mod reducer;
mod state;

pub use action::{Action, Key, Params, Payload};
pub use factory::{ActionFactory, Effect};
pub use names::{ActionTypes, DEFAULT_RESET_KIND, ERROR_SUFFIX};
pub use operations::{CrudOperations, ParseOperationsError};
pub use options::{ResourceOptions, Transform};
pub use reducer::{ReducerOptions, ResourceReducer, Transition};
pub use state::{DeleteState, ResourceState, SaveState};

use std::sync::Arc;

use serde_json::Value;

use crate::store::{Dispatch, Store};
use crate::transport::{Method, Transport};

/// A resource's factory and store, sharing one vocabulary.
pub struct Resource<T> {
    factory: ActionFactory<T>,
    store: Arc<Store<ResourceReducer>>,
}

impl<T: Transport> Resource<T> {
    pub fn new(options: &ResourceOptions, transport: Arc<T>) -> Self {
        let factory = ActionFactory::new(options, transport);
        let reducer = ResourceReducer::new(factory.types().clone(), options.reducer_options());
        Self {
            factory,
            store: Arc::new(Store::new(reducer)),
        }
    }

    pub fn factory(&self) -> &ActionFactory<T> {
        &self.factory
    }

    pub fn store(&self) -> &Arc<Store<ResourceReducer>> {
        &self.store
    }

    pub fn state(&self) -> ResourceState {
        self.store.state()
    }

    pub async fn fetch_list(&self, params: Option<Params>) -> ResourceState {
        self.factory.fetch_list(params).run(self.store.as_ref()).await;
        self.store.state()
    }

    pub async fn fetch_one(&self, id: Key) -> ResourceState {
        self.factory.fetch_one(id).run(self.store.as_ref()).await;
        self.store.state()
    }

    pub async fn save(&self, data: Value, id: Option<Key>, method: Option<Method>) -> ResourceState {
        self.factory.save(data, id, method).run(self.store.as_ref()).await;
        self.store.state()
    }

    pub async fn delete(&self, id: Key) -> ResourceState {
        self.factory.delete(id).run(self.store.as_ref()).await;
        self.store.state()
    }

    /// Dispatch the global reset to this resource's store only.
    pub fn reset_all(&self) -> ResourceState {
        self.store.dispatch(self.factory.reset_all());
        self.store.state()
    }
}
