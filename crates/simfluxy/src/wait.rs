//! Async dispatch bridge
//!
//! `Store::wait` spawns a task that awaits a caller-supplied future. On success the
//! resolved value becomes the payload of a `{type, payload}` action, which is queued
//! on the store's dispatch queue. Outstanding waits are independent: the store does
//! not track them, order them, or cancel them, so settlement order alone decides
//! which dispatch lands last.
//!
//! A rejected future never dispatches. The rejection is logged and reported through
//! the returned [`Pending`] handle, which callers are free to drop.

use crate::action::Action;
use crate::dispatcher::Dispatcher;
use crate::error::{StoreError, WaitError};
use crate::store::Store;
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Handle to an in-flight wait; resolves once the outcome has been queued or rejected
pub type Pending = JoinHandle<Result<(), WaitError>>;

impl Store {
    /// Dispatch `{type: action_type, payload}` once `future` resolves with `Ok(payload)`
    ///
    /// Returns immediately. Fails with `NoRuntime` when called outside a tokio runtime.
    pub fn wait<F, T, E>(
        &self,
        future: F,
        action_type: impl Into<String>,
    ) -> Result<Pending, StoreError>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        T: Serialize + Send + 'static,
        E: Display + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| StoreError::NoRuntime)?;
        let dispatcher = self.dispatcher()?;
        Ok(spawn_wait(
            &runtime,
            future,
            action_type.into(),
            dispatcher,
            self.config().name.clone(),
        ))
    }
}

fn spawn_wait<F, T, E>(
    runtime: &Handle,
    future: F,
    action_type: String,
    dispatcher: Dispatcher,
    store_name: String,
) -> Pending
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Serialize + Send + 'static,
    E: Display + Send + 'static,
{
    runtime.spawn(async move {
        let value = match future.await {
            Ok(value) => value,
            Err(e) => {
                let reason = e.to_string();
                log::warn!("{}: pending `{}` rejected: {}", store_name, action_type, reason);
                return Err(WaitError::Rejected {
                    action_type,
                    reason,
                });
            }
        };

        let payload = match serde_json::to_value(value) {
            Ok(payload) => payload,
            Err(source) => {
                log::warn!("{}: payload for `{}` not serializable: {}", store_name, action_type, source);
                return Err(WaitError::Payload {
                    action_type,
                    source,
                });
            }
        };

        log::debug!("{}: pending `{}` settled", store_name, action_type);
        dispatcher
            .try_dispatch(Action::with_payload(action_type, payload))
            .inspect_err(|e| log::warn!("{}: {}", store_name, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::Reducers;
    use serde_json::{json, Value};
    use std::convert::Infallible;

    fn last_payload_store() -> Store {
        Store::new(Reducers::new().slice("last", |slice: Value, action: &Action| {
            action.payload().cloned().unwrap_or(slice)
        }))
        .unwrap()
    }

    #[test]
    fn test_wait_needs_runtime() {
        let store = last_payload_store();
        let result = store.wait(async { Ok::<_, Infallible>(1) }, "SET");
        assert_eq!(result.unwrap_err(), StoreError::NoRuntime);
    }

    #[tokio::test]
    async fn test_rejection_never_dispatches() {
        let store = last_payload_store();
        store.init_state(json!({"last": 0})).unwrap();

        let pending = store
            .wait(async { Err::<i32, _>("backend unavailable") }, "SET")
            .unwrap();
        let err = pending.await.unwrap().unwrap_err();
        assert!(matches!(
            err,
            WaitError::Rejected { ref action_type, ref reason }
                if action_type == "SET" && reason == "backend unavailable"
        ));

        tokio::task::yield_now().await;
        assert_eq!(*store.get_state(), json!({"last": 0}));
    }

    #[tokio::test]
    async fn test_resolution_is_queued() {
        let store = last_payload_store();
        store.init_state(json!({"last": 0})).unwrap();

        let pending = store.wait(async { Ok::<_, Infallible>("done") }, "SET").unwrap();
        pending.await.unwrap().unwrap();

        // Give the dispatch worker a turn
        for _ in 0..10 {
            if store.get_state().slice("last") == &json!("done") {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(store.get_state().slice("last"), &json!("done"));
    }
}
