//! Dispatcher feeding the store's dispatch queue
//!
//! Async continuations never touch the store directly. They hand their action to
//! the Dispatcher, which sends it to the single dispatch worker; the worker is the
//! only consumer and applies actions through `Store::dispatch` in arrival order.

use crate::action::Action;
use crate::error::WaitError;
use std::fmt;
use tokio::sync::mpsc::UnboundedSender;

/// Clonable handle for enqueueing actions on the dispatch queue
#[derive(Clone)]
pub struct Dispatcher {
    action_tx: UnboundedSender<Action>,
}

impl Dispatcher {
    /// Create a dispatcher over the worker's action channel
    pub(crate) fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self { action_tx }
    }

    /// Enqueue an action, logging if the worker is gone
    pub fn dispatch(&self, action: Action) {
        if let Err(e) = self.try_dispatch(action) {
            log::error!("Dispatcher: failed to send action: {}", e);
        }
    }

    /// Enqueue an action, reporting a closed queue to the caller
    pub fn try_dispatch(&self, action: Action) -> Result<(), WaitError> {
        self.action_tx
            .send(action)
            .map_err(|rejected| WaitError::QueueClosed(rejected.0.kind))
    }

    pub fn is_closed(&self) -> bool {
        self.action_tx.is_closed()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("closed", &self.is_closed())
            .finish()
    }
}
