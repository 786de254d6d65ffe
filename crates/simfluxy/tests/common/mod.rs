//! Shared fixtures: a `countAndObject` slice and a `stats` slice that mirrors the count

#![allow(dead_code)]

use serde_json::{json, Map, Value};
use simfluxy::{observing, Action, Reducers, State, Store};

pub const SET_COUNT: &str = "SET_COUNT";
pub const INCREMENT_COUNT: &str = "INCREMENT_COUNT";
pub const ADD_PROPERTY: &str = "ADD_PROPERTY";
pub const UPDATE_STATS: &str = "UPDATE_STATS";
pub const REMOVE_STAT: &str = "REMOVE_STAT";

pub fn set_count(count: i64) -> Action {
    Action::with_payload(SET_COUNT, count)
}

pub fn increment_count() -> Action {
    Action::new(INCREMENT_COUNT)
}

pub fn add_property(object: Value) -> Action {
    Action::with_payload(ADD_PROPERTY, object)
}

pub fn update_stats(object: Value) -> Action {
    Action::with_payload(UPDATE_STATS, object)
}

pub fn remove_stat(name: &str) -> Action {
    Action::with_payload(REMOVE_STAT, json!({ "statName": name }))
}

fn as_object(slice: Value) -> Map<String, Value> {
    match slice {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn merge(mut target: Map<String, Value>, payload: Option<&Value>) -> Map<String, Value> {
    if let Some(Value::Object(extra)) = payload {
        for (key, value) in extra {
            target.insert(key.clone(), value.clone());
        }
    }
    target
}

pub fn count_and_object(slice: Value, action: &Action) -> Value {
    let mut slice = as_object(slice);
    match action.kind.as_str() {
        SET_COUNT => {
            slice.insert("count".to_string(), action.payload().cloned().unwrap_or(Value::Null));
        }
        INCREMENT_COUNT => {
            let count = slice.get("count").and_then(Value::as_i64).unwrap_or(0);
            slice.insert("count".to_string(), json!(count + 1));
        }
        ADD_PROPERTY => slice = merge(slice, action.payload()),
        _ => {}
    }
    Value::Object(slice)
}

/// Keeps `count` in step with `countAndObject.count` as folded in the same pass
pub fn stats(slice: Value, action: &Action, working: &State) -> Value {
    let mut slice = as_object(slice);
    match action.kind.as_str() {
        UPDATE_STATS => slice = merge(slice, action.payload()),
        REMOVE_STAT => {
            if let Some(name) = action
                .payload()
                .and_then(|payload| payload.get("statName"))
                .and_then(Value::as_str)
            {
                slice.insert(name.to_string(), Value::Null);
            }
        }
        _ => {}
    }
    if let Some(count) = working.slice("countAndObject").get("count") {
        slice.insert("count".to_string(), count.clone());
    }
    Value::Object(slice)
}

pub fn reducers() -> Reducers {
    Reducers::new()
        .slice("countAndObject", count_and_object)
        .reducer("stats", observing(stats))
}

pub fn initial_state() -> Value {
    json!({
        "countAndObject": { "count": 10 },
        "stats": {}
    })
}

/// Store built from the fixtures, already initialized
pub fn store() -> Store {
    init_logging();
    let store = Store::new(reducers()).expect("fixture reducers are valid");
    assert_eq!(store.init_state(initial_state()), Ok(true));
    store
}

pub fn count(store: &Store) -> Value {
    store.get_state().slice("stats").get("count").cloned().unwrap_or(Value::Null)
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
