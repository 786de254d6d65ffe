//! Whole-state tree: slice name -> slice state

use crate::error::StoreError;
use crate::validate::is_object;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// Immutable-by-construction state object handed out by the store.
///
/// Every dispatch builds a new `State`; the store shares it behind an `Arc`,
/// so callers only ever see read-only snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(Map<String, Value>);

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slice stored under `name`, `Null` when absent
    pub fn slice(&self, name: &str) -> &Value {
        self.0.get(name).unwrap_or(&NULL)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Slice names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub(crate) fn set_slice(&mut self, name: &str, slice: Value) {
        self.0.insert(name.to_string(), slice);
    }

    pub(crate) fn take_slice(&mut self, name: &str) -> Value {
        self.0.remove(name).unwrap_or(Value::Null)
    }
}

impl TryFrom<Value> for State {
    type Error = StoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if !is_object(&value) {
            return Err(not_an_object());
        }
        let Value::Object(map) = value else {
            return Err(not_an_object());
        };
        Ok(Self(map))
    }
}

fn not_an_object() -> StoreError {
    StoreError::InvalidArgument("initial state must be an object".to_string())
}

impl From<Map<String, Value>> for State {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl PartialEq<Value> for State {
    fn eq(&self, other: &Value) -> bool {
        other.as_object() == Some(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_from_object() {
        let state = State::try_from(json!({"count": 1, "stats": {}})).unwrap();
        assert_eq!(state.slice("count"), &json!(1));
        assert_eq!(state.keys().collect::<Vec<_>>(), vec!["count", "stats"]);
        assert_eq!(state, json!({"count": 1, "stats": {}}));
    }

    #[test]
    fn test_state_rejects_non_objects() {
        for bad in [Value::Null, json!(5), json!("Hello"), json!(true), json!([1, 2, "Hi"])] {
            assert!(matches!(
                State::try_from(bad),
                Err(StoreError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_missing_slice_reads_as_null() {
        let state = State::new();
        assert!(state.slice("nope").is_null());
        assert!(state.get("nope").is_none());
        assert!(state.is_empty());
    }
}
