//! Reducer composition
//!
//! A [`CombinedReducer`] fans one action out across independently-owned slices.
//! Slices are reduced in the order they were registered, and each result is folded
//! into a working copy of the state before the next slice runs, so a later slice
//! can read what an earlier slice produced in the same pass (see [`observing`]).

use crate::action::Action;
use crate::error::StoreError;
use crate::state::State;
use crate::validate::is_slice_name;
use serde_json::Value;
use std::collections::HashSet;

/// Reducer for a single slice - pure function from prior slice state + action to new slice state
pub trait Reducer: Send + Sync {
    /// `working` is the whole state as folded so far in the current pass
    fn reduce(&self, slice: Value, action: &Action, working: &State) -> Value;
}

impl<F> Reducer for F
where
    F: Fn(Value, &Action) -> Value + Send + Sync,
{
    fn reduce(&self, slice: Value, action: &Action, _working: &State) -> Value {
        self(slice, action)
    }
}

/// Slice reducer that also reads the working state of the current pass
pub struct Observing<F>(F);

/// Wrap a reducer that needs to see slices folded earlier in the same dispatch
pub fn observing<F>(reducer: F) -> Observing<F>
where
    F: Fn(Value, &Action, &State) -> Value + Send + Sync,
{
    Observing(reducer)
}

impl<F> Reducer for Observing<F>
where
    F: Fn(Value, &Action, &State) -> Value + Send + Sync,
{
    fn reduce(&self, slice: Value, action: &Action, working: &State) -> Value {
        (self.0)(slice, action, working)
    }
}

/// Whole-state reducer driven by the store
pub trait RootReducer: Send + Sync {
    fn reduce(&self, state: &State, action: &Action) -> State;
}

impl<F> RootReducer for F
where
    F: Fn(&State, &Action) -> State + Send + Sync,
{
    fn reduce(&self, state: &State, action: &Action) -> State {
        self(state, action)
    }
}

/// Ordered mapping from slice name to slice reducer, validated by [`Reducers::combine`]
#[derive(Default)]
pub struct Reducers {
    slices: Vec<(String, Box<dyn Reducer>)>,
}

impl Reducers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plain `(slice, action) -> slice` reducer
    pub fn slice<F>(self, name: impl Into<String>, reducer: F) -> Self
    where
        F: Fn(Value, &Action) -> Value + Send + Sync + 'static,
    {
        self.reducer(name, reducer)
    }

    /// Register any [`Reducer`] implementation, e.g. one built with [`observing`]
    pub fn reducer<R>(mut self, name: impl Into<String>, reducer: R) -> Self
    where
        R: Reducer + 'static,
    {
        self.slices.push((name.into(), Box::new(reducer)));
        self
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Validate the mapping and build the composed reducer
    pub fn combine(self) -> Result<CombinedReducer, StoreError> {
        let mut seen = HashSet::new();
        for (name, _) in &self.slices {
            if !is_slice_name(name) {
                return Err(StoreError::Configuration(
                    "slice names must not be empty".to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(StoreError::Configuration(format!(
                    "slice `{}` registered twice",
                    name
                )));
            }
        }

        log::debug!(
            "Combined {} slice reducers: {:?}",
            self.slices.len(),
            self.slices.iter().map(|(name, _)| name).collect::<Vec<_>>()
        );
        Ok(CombinedReducer {
            slices: self.slices,
        })
    }
}

/// Compose a reducers mapping into one reducer; fails fast on a malformed mapping
pub fn combine_reducers(reducers: Reducers) -> Result<CombinedReducer, StoreError> {
    reducers.combine()
}

/// Root reducer built once from a [`Reducers`] mapping; its slice order never changes
pub struct CombinedReducer {
    slices: Vec<(String, Box<dyn Reducer>)>,
}

impl CombinedReducer {
    pub fn slice_names(&self) -> impl Iterator<Item = &str> {
        self.slices.iter().map(|(name, _)| name.as_str())
    }
}

impl RootReducer for CombinedReducer {
    fn reduce(&self, state: &State, action: &Action) -> State {
        let mut working = state.clone();
        for (name, reducer) in &self.slices {
            let prior = working.slice(name).clone();
            let next = reducer.reduce(prior, action, &working);
            working.set_slice(name, next);
        }

        // Only registered slices survive into the new state
        let mut next = State::new();
        for (name, _) in &self.slices {
            next.set_slice(name, working.take_slice(name));
        }
        next
    }
}
