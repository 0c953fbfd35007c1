//! Host store: owns the view state and applies signals one at a time.
//!
//! The reducer is pure; the store is the single place holding a writable
//! reference to the state. Delivery order is the only order that counts:
//! if two list fetches finish out of order, the later delivery wins.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::mvi::Reducer;
use crate::resource::Action;

/// Something signals can be delivered to.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, action: Action);
}

impl<D: Dispatch + ?Sized> Dispatch for Arc<D> {
    fn dispatch(&self, action: Action) {
        (**self).dispatch(action)
    }
}

impl<D: Dispatch + ?Sized> Dispatch for &D {
    fn dispatch(&self, action: Action) {
        (**self).dispatch(action)
    }
}

impl Dispatch for mpsc::UnboundedSender<Action> {
    fn dispatch(&self, action: Action) {
        if let Err(err) = self.send(action) {
            tracing::warn!(kind = err.0.kind().unwrap_or_default(), "Signal channel closed, signal dropped");
        }
    }
}

struct StoreInner<S> {
    state: S,
    version: u64,
}

/// Serializing owner of one reducer's state.
pub struct Store<R: Reducer> {
    reducer: R,
    inner: Mutex<StoreInner<R::State>>,
}

impl<R: Reducer> Store<R> {
    pub fn new(reducer: R) -> Self {
        let state = reducer.initial_state();
        Self {
            reducer,
            inner: Mutex::new(StoreInner { state, version: 0 }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> R::State {
        self.inner.lock().state.clone()
    }

    /// Number of signals that changed the state so far.
    pub fn version(&self) -> u64 {
        self.inner.lock().version
    }

    pub fn reducer(&self) -> &R {
        &self.reducer
    }

    /// Apply one intent. Returns whether the state changed.
    pub fn apply(&self, intent: &R::Intent) -> bool {
        let mut inner = self.inner.lock();
        let next = self.reducer.reduce(inner.state.clone(), intent);
        if next == inner.state {
            return false;
        }
        inner.state = next;
        inner.version += 1;
        true
    }
}

impl<R> Dispatch for Store<R>
where
    R: Reducer<Intent = Action>,
{
    fn dispatch(&self, action: Action) {
        if !self.apply(&action) {
            tracing::trace!(kind = action.kind().unwrap_or_default(), "Signal left state unchanged");
        }
    }
}

/// Deliver every signal from `receiver` to each target, in order, until
/// all senders are gone. Returns the number of signals received.
pub async fn drain(mut receiver: mpsc::UnboundedReceiver<Action>, targets: &[&dyn Dispatch]) -> usize {
    let mut delivered = 0;
    while let Some(action) = receiver.recv().await {
        for target in targets {
            target.dispatch(action.clone());
        }
        delivered += 1;
    }
    tracing::debug!(delivered, "Signal channel drained");
    delivered
}
