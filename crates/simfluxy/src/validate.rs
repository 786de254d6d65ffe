//! Shape predicates shared by every component
//!
//! Values arriving as `serde_json::Value` are classified at runtime. Callable and
//! awaitable inputs need no predicate: reducers and handlers are bound by `Fn`,
//! and `Store::wait` by `Future`.

use serde_json::Value;

/// True iff `value` is a JSON object (not null, not an array, not a scalar)
pub fn is_object(value: &Value) -> bool {
    value.is_object()
}

pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

/// True iff `value` is an object whose `type` field is a string
pub fn is_valid_action(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|fields| fields.get("type"))
        .is_some_and(Value::is_string)
}

/// Slice names key the state object and must not be empty
pub fn is_slice_name(name: &str) -> bool {
    !name.is_empty()
}
