//! Backend response envelope
//!
//! Every UniVerse endpoint answers with the same loose shape:
//! ```json
//! {
//!     "success": true,
//!     "message": "Club retrieved successfully",
//!     "club": { ... }
//! }
//! ```
//! The payload sits under an endpoint-specific key (`club`, `clubs`,
//! `membership`, `payment`, ...). A few endpoints return their fields flat at
//! the top level instead. [`Envelope`] decodes both forms once so the rest of
//! the client only sees typed entities.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Envelope decoding errors
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("Response body is not a JSON object")]
    NotAnObject,

    #[error("Missing field in response: {0}")]
    MissingField(String),

    #[error("Invalid `{key}` in response: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

fn default_success() -> bool {
    true
}

/// Decoded backend response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope {
    /// Absent on a few flat responses, which only exist on success
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Everything else the endpoint returned
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Envelope {
    /// Decode a raw response body
    pub fn from_value(value: Value) -> Result<Self, EnvelopeError> {
        if !value.is_object() {
            return Err(EnvelopeError::NotAnObject);
        }
        serde_json::from_value(value).map_err(|source| EnvelopeError::Decode {
            key: "<root>".into(),
            source,
        })
    }

    /// Build a successful envelope
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            payload: Map::new(),
        }
    }

    /// Build a rejection envelope
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            payload: Map::new(),
        }
    }

    /// Attach a payload entry
    pub fn with(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.payload.insert(key.into(), value);
        self
    }

    /// Remove and decode the payload stored under `key`
    ///
    /// A `null` value counts as missing.
    pub fn take<T: DeserializeOwned>(&mut self, key: &str) -> Result<T, EnvelopeError> {
        match self.payload.remove(key) {
            None | Some(Value::Null) => Err(EnvelopeError::MissingField(key.to_string())),
            Some(value) => serde_json::from_value(value).map_err(|source| EnvelopeError::Decode {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Like [`Envelope::take`] but tolerates an absent key
    pub fn take_opt<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, EnvelopeError> {
        match self.take(key) {
            Ok(value) => Ok(Some(value)),
            Err(EnvelopeError::MissingField(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Decode the whole top level as `T` (flat responses)
    pub fn into_flat<T: DeserializeOwned>(self) -> Result<T, EnvelopeError> {
        serde_json::from_value(Value::Object(self.payload)).map_err(|source| {
            EnvelopeError::Decode {
                key: "<flat>".into(),
                source,
            }
        })
    }

    /// Message for display, with a fallback when the backend sent none
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Pull a human-readable message out of an error body
///
/// Checks `message` first, then `error`.
pub fn extract_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}
