//! Application error type

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the error shape a front end renders:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages (backend messages are kept verbatim)
/// - Optional structured details such as the field to focus
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::with_message(ErrorCode::ValidationFailed, "Full name is required")
            .with_detail("field", "fullName")
            .with_detail("reason", "required");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details["field"], "fullName");
        assert_eq!(details["reason"], "required");
        assert!(!details.contains_key("missing"));
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::PaymentFailed, "Card declined");
        assert_eq!(format!("{}", err), "Card declined");
    }

    #[test]
    fn test_app_error_serialize() {
        let err = AppError::with_message(ErrorCode::AlreadyMember, "You are already a member of this club");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], 4002);
        assert_eq!(json["message"], "You are already a member of this club");
        assert!(json.get("details").is_none());
    }
}
