use crate::action::IntoAction;
use crate::dispatcher::Dispatcher;
use crate::error::StoreError;
use crate::reducer::{Reducers, RootReducer};
use crate::registry::{Handler, Registry};
use crate::state::State;
use crate::worker::spawn_dispatch_worker;
use serde_json::Value;
use simfluxy_config::StoreConfig;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::runtime::Handle;

/// Store - holds the state and routes every change through `dispatch`
///
/// - State starts empty and is replaced once by `init_state`
/// - `dispatch` runs the root reducer, swaps in the new state, then notifies subscribers
/// - `wait` turns a future's successful result into a queued dispatch
///
/// `Store` is a cheap handle: clones share the same state, subscribers and dispatch
/// queue, so a clone can be moved into async continuations.
#[derive(Clone)]
pub struct Store {
    shared: Arc<Shared>,
}

struct Shared {
    cell: Mutex<StateCell>,
    reducer: Box<dyn RootReducer>,
    subscribers: Arc<Registry<State>>,
    queue: Mutex<Option<Dispatcher>>,
    config: StoreConfig,
}

struct StateCell {
    state: Arc<State>,
    initialized: bool,
}

impl Store {
    /// Build a store from a reducers mapping, failing fast on a malformed mapping
    ///
    /// Uses the discovered `.simfluxy.toml` config, or defaults when there is none.
    pub fn new(reducers: Reducers) -> Result<Self, StoreError> {
        Self::with_config(reducers, StoreConfig::load())
    }

    pub fn with_config(reducers: Reducers, config: StoreConfig) -> Result<Self, StoreError> {
        let reducer = reducers.combine()?;
        Ok(Self::from_root(Box::new(reducer), config))
    }

    /// Build a store around a single whole-state reducer
    pub fn with_reducer<R>(reducer: R) -> Self
    where
        R: RootReducer + 'static,
    {
        Self::from_root(Box::new(reducer), StoreConfig::load())
    }

    fn from_root(reducer: Box<dyn RootReducer>, config: StoreConfig) -> Self {
        log::debug!("{}: store created", config.name);
        Self {
            shared: Arc::new(Shared {
                cell: Mutex::new(StateCell {
                    state: Arc::new(State::new()),
                    initialized: false,
                }),
                reducer,
                subscribers: Arc::new(Registry::new()),
                queue: Mutex::new(None),
                config,
            }),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.shared.config
    }

    /// Current state snapshot
    pub fn get_state(&self) -> Arc<State> {
        Arc::clone(&self.cell().state)
    }

    pub fn is_initialized(&self) -> bool {
        self.cell().initialized
    }

    /// Set the initial state; returns `false` if the store was already initialized
    ///
    /// A non-object value is an error even when the store is already initialized.
    pub fn init_state(&self, initial: Value) -> Result<bool, StoreError> {
        let initial = State::try_from(initial)?;

        let mut cell = self.cell();
        if cell.initialized {
            log::debug!("{}: init_state rejected, already initialized", self.config().name);
            return Ok(false);
        }
        cell.state = Arc::new(initial);
        cell.initialized = true;
        log::debug!("{}: state initialized", self.config().name);
        Ok(true)
    }

    /// Reduce an action into a new state and notify subscribers
    ///
    /// Accepts a typed [`Action`](crate::Action) or a raw JSON value; a value without a
    /// string `type` fails with `InvalidArgument` and leaves state untouched.
    ///
    /// Reductions are applied one at a time, and every applied state is published
    /// exactly once. Publishing happens after the state lock is released, so with
    /// dispatches racing on several threads a subscriber may receive those states
    /// out of order. `get_state` always returns the last applied state.
    pub fn dispatch(&self, action: impl IntoAction) -> Result<(), StoreError> {
        let action = action.into_action()?;
        let config = self.config();
        if config.log_actions {
            log::debug!("{}: dispatch `{}`", config.name, action.kind);
        }

        let next = {
            let mut cell = self.cell();
            let next = Arc::new(self.shared.reducer.reduce(&cell.state, &action));
            cell.state = Arc::clone(&next);
            next
        };

        if config.log_state {
            log::trace!("{}: state after `{}`: {:?}", config.name, action.kind, next);
        }

        self.shared.subscribers.publish(&next);
        Ok(())
    }

    /// Register a callback notified with the new state after every dispatch
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&State) + Send + Sync + 'static,
    {
        self.subscribe_handler(Handler::new(callback))
    }

    /// Register an existing handler; subscribing it again keeps a single entry
    pub fn subscribe_handler(&self, handler: Handler<State>) -> Subscription {
        let handler = self.shared.subscribers.subscribe(handler);
        Subscription {
            registry: Arc::downgrade(&self.shared.subscribers),
            handler,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.len()
    }

    /// Dispatcher feeding this store's dispatch queue
    ///
    /// Starts the dispatch worker on the current tokio runtime on first use, and again
    /// whenever the previous worker is gone (its runtime shut down).
    pub fn dispatcher(&self) -> Result<Dispatcher, StoreError> {
        let mut queue = self.shared.queue.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(dispatcher) = queue.as_ref().filter(|d| !d.is_closed()) {
            return Ok(dispatcher.clone());
        }
        let runtime = Handle::try_current().map_err(|_| StoreError::NoRuntime)?;
        if queue.is_some() {
            log::debug!("{}: dispatch worker gone, restarting", self.config().name);
        }
        let dispatcher = spawn_dispatch_worker(&runtime, self.downgrade());
        *queue = Some(dispatcher.clone());
        Ok(dispatcher)
    }

    pub(crate) fn downgrade(&self) -> WeakStore {
        WeakStore(Arc::downgrade(&self.shared))
    }

    fn cell(&self) -> MutexGuard<'_, StateCell> {
        // State is only replaced after a reducer returns, so a poisoned cell is still consistent
        self.shared.cell.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.config().name)
            .field("initialized", &self.is_initialized())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Weak handle held by the dispatch worker
pub(crate) struct WeakStore(Weak<Shared>);

impl WeakStore {
    pub(crate) fn upgrade(&self) -> Option<Store> {
        self.0.upgrade().map(|shared| Store { shared })
    }
}

/// Returned by `subscribe`; removes exactly its handler when asked
pub struct Subscription {
    registry: Weak<Registry<State>>,
    handler: Handler<State>,
}

impl Subscription {
    /// Remove the handler and return it; safe to call any number of times
    pub fn unsubscribe(&self) -> Handler<State> {
        match self.registry.upgrade() {
            Some(registry) => registry.unsubscribe(&self.handler),
            None => self.handler.clone(),
        }
    }

    pub fn handler(&self) -> &Handler<State> {
        &self.handler
    }

    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(&self.handler))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("handler", &self.handler)
            .field("active", &self.is_active())
            .finish()
    }
}
