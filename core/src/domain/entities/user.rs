//! User record returned by a subscriber search.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Subscriber record as sent by the backend.
///
/// The shape is owned by the server, so the payload is kept verbatim and
/// forwarded unchanged. Use [`UserRecord::deserialize_into`] to view it as a
/// concrete type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(Value);

impl UserRecord {
    /// Wrap a raw JSON payload
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Look up a top-level field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Top-level string field, if present and a string
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Borrow the raw payload
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume the record, returning the raw payload
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Decode the payload into a caller-defined type
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.0)
    }
}

impl From<Value> for UserRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
