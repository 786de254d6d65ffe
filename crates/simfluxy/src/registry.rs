//! Subscriber registry (pub-sub)
//!
//! Handlers are compared by identity, not by value: subscribing the same
//! [`Handler`] twice keeps a single entry. `publish` works on a snapshot taken
//! when it starts, and no lock is held while handlers run, so a handler may
//! subscribe, unsubscribe or dispatch from inside a notification:
//! - every handler registered when the pass started is called exactly once,
//!   even if an earlier handler unsubscribed it
//! - a handler added during the pass is first called on the next publish

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared, identity-compared callback
pub struct Handler<T: ?Sized>(Arc<dyn Fn(&T) + Send + Sync>);

impl<T: ?Sized> Handler<T> {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    pub fn call(&self, data: &T) {
        (self.0)(data)
    }
}

impl<T: ?Sized> Clone for Handler<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for Handler<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Eq for Handler<T> {}

impl<T: ?Sized> fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// Ordered collection of distinct handlers
pub struct Registry<T: ?Sized> {
    handlers: RwLock<Vec<Handler<T>>>,
}

impl<T: ?Sized> Registry<T> {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Add `handler` unless it is already registered; returns the handler
    pub fn subscribe(&self, handler: Handler<T>) -> Handler<T> {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        if !handlers.contains(&handler) {
            handlers.push(handler.clone());
        }
        handler
    }

    /// Remove `handler` if registered; returns the handler
    pub fn unsubscribe(&self, handler: &Handler<T>) -> Handler<T> {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(index) = handlers.iter().position(|h| h == handler) {
            handlers.remove(index);
        }
        handler.clone()
    }

    /// Call every registered handler, in registration order, with `data`
    pub fn publish(&self, data: &T) {
        let snapshot = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for handler in &snapshot {
            handler.call(data);
        }
    }

    pub fn contains(&self, handler: &Handler<T>) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(handler)
    }

    pub fn len(&self) -> usize {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
