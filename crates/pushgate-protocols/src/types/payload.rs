//! Push payload as delivered by the remote push service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;

/// Keys read from the payload's `data` bag.
pub mod data_keys {
    pub const TITLE: &str = "title";
    pub const BODY: &str = "body";
    pub const CLICK_ACTION: &str = "click_action";
}

/// Raw push message.
///
/// Every field is untrusted and optional. The `data` bag is kept as an
/// arbitrary JSON value: no shape beyond "maybe an object with string
/// fields" is assumed or validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushPayload {
    /// Identifier assigned by the push service, when it sends one.
    #[serde(
        default,
        alias = "fcmMessageId",
        skip_serializing_if = "Option::is_none"
    )]
    pub message_id: Option<String>,

    /// Data bag carrying `title`, `body`, `click_action` and anything else.
    #[serde(default)]
    pub data: Value,

    /// Display block some push services attach. Never used for field resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<Value>,

    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PushPayload {
    /// Create a payload from a data bag.
    pub fn from_data(data: Value) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    /// Parse a payload from raw push bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Set the push-service message identifier.
    pub fn with_message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }

    /// Set a string field in the data bag, turning it into an object if needed.
    pub fn with_data_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if !self.data.is_object() {
            self.data = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.data {
            map.insert(key.into(), Value::String(value.into()));
        }
        self
    }

    /// Look up a data field.
    ///
    /// Only non-empty JSON strings count as present; numbers, nulls,
    /// nested objects and empty strings all read as absent.
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        self.data_str(data_keys::TITLE)
    }

    pub fn body(&self) -> Option<&str> {
        self.data_str(data_keys::BODY)
    }

    pub fn click_action(&self) -> Option<&str> {
        self.data_str(data_keys::CLICK_ACTION)
    }
}
