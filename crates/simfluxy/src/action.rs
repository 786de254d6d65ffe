//! Actions - typed messages describing an intended state change
//!
//! An action serializes as `{"type": "...", ...fields}`. The typed [`Action`] always
//! carries a string type; raw JSON values are checked on the way in.

use crate::error::StoreError;
use crate::validate::is_valid_action;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Action {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Map::new(),
        }
    }

    /// Action carrying `payload` under the `payload` field
    pub fn with_payload(kind: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self::new(kind).field("payload", payload)
    }

    /// Attach an additional field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn payload(&self) -> Option<&Value> {
        self.fields.get("payload")
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl TryFrom<Value> for Action {
    type Error = StoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if !is_valid_action(&value) {
            return Err(invalid_action());
        }
        let Value::Object(mut fields) = value else {
            return Err(invalid_action());
        };
        match fields.remove("type") {
            Some(Value::String(kind)) => Ok(Self { kind, fields }),
            _ => Err(invalid_action()),
        }
    }
}

impl From<Action> for Value {
    fn from(action: Action) -> Self {
        let mut fields = action.fields;
        fields.insert("type".to_string(), Value::String(action.kind));
        Value::Object(fields)
    }
}

fn invalid_action() -> StoreError {
    StoreError::InvalidArgument("action must be an object with a string `type`".to_string())
}

/// Anything `Store::dispatch` accepts: typed actions pass through, raw values are validated
pub trait IntoAction {
    fn into_action(self) -> Result<Action, StoreError>;
}

impl IntoAction for Action {
    fn into_action(self) -> Result<Action, StoreError> {
        Ok(self)
    }
}

impl IntoAction for Value {
    fn into_action(self) -> Result<Action, StoreError> {
        Action::try_from(self)
    }
}

impl IntoAction for &Value {
    fn into_action(self) -> Result<Action, StoreError> {
        Action::try_from(self.clone())
    }
}
