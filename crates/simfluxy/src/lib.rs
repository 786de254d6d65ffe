//! Minimal unidirectional state container
//!
//! State lives in a [`Store`] and only changes through pure reducers applied to
//! dispatched [`Action`]s. Subscribers are notified synchronously after every
//! dispatch, and [`Store::wait`] bridges futures into dispatches.
//!
//! # Architecture
//!
//! ```text
//!  dispatch(action) ──► CombinedReducer ──► new State ──► Registry::publish
//!        ▲                (slice by slice)
//!        │
//!  dispatch worker ◄── Dispatcher ◄── wait(future, "TYPE") on success
//! ```
//!
//! # Example
//!
//! ```rust
//! use serde_json::{json, Value};
//! use simfluxy::{Action, Reducers, Store};
//!
//! # fn main() -> Result<(), simfluxy::StoreError> {
//! let store = Store::new(Reducers::new().slice("count", |slice: Value, action: &Action| {
//!     match action.kind.as_str() {
//!         "INC" => json!(slice.as_i64().unwrap_or(0) + 1),
//!         _ => slice,
//!     }
//! }))?;
//!
//! store.init_state(json!({"count": 0}))?;
//! store.dispatch(Action::new("INC"))?;
//! store.dispatch(json!({"type": "INC"}))?;
//! assert_eq!(store.get_state().slice("count"), &json!(2));
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod dispatcher;
pub mod error;
pub mod reducer;
pub mod registry;
pub mod state;
pub mod store;
pub mod validate;
pub mod wait;

mod worker;

pub use action::{Action, IntoAction};
pub use dispatcher::Dispatcher;
pub use error::{StoreError, WaitError};
pub use reducer::{combine_reducers, observing, CombinedReducer, Reducer, Reducers, RootReducer};
pub use registry::{Handler, Registry};
pub use simfluxy_config::StoreConfig;
pub use state::State;
pub use store::{Store, Subscription};
pub use wait::Pending;
