//! Dispatch worker task that drains the dispatch queue into the store
//!
//! The worker is the single consumer of the queue. It holds only a weak handle
//! to the store, so it stops once the store is dropped or every sender is gone.
//! A reducer panic on a queued action is logged and the loop keeps draining.

use crate::action::Action;
use crate::dispatcher::Dispatcher;
use crate::store::WeakStore;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Spawn the dispatch worker on `runtime` and return the dispatcher feeding it
pub(crate) fn spawn_dispatch_worker(runtime: &Handle, store: WeakStore) -> Dispatcher {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    runtime.spawn(dispatch_loop(action_rx, store));
    Dispatcher::new(action_tx)
}

async fn dispatch_loop(mut action_rx: UnboundedReceiver<Action>, store: WeakStore) {
    log::info!("Dispatch worker started");

    while let Some(action) = action_rx.recv().await {
        let Some(store) = store.upgrade() else {
            log::debug!("Store dropped, discarding `{}`", action.kind);
            break;
        };
        let kind = action.kind.clone();
        match catch_unwind(AssertUnwindSafe(|| store.dispatch(action))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                log::error!("{}: queued `{}` failed: {}", store.config().name, kind, e);
            }
            Err(panic) => {
                log::error!(
                    "{}: reducer panicked on queued `{}`: {}",
                    store.config().name,
                    kind,
                    panic_message(panic.as_ref())
                );
            }
        }
    }

    log::info!("Dispatch worker stopped");
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
