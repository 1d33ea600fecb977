//! Client error types

use shared::EnvelopeError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::membership::ValidationError;
use crate::store::StoreError;

/// Client error type
///
/// Backend messages in `Conflict`, `Rejected` and friends are carried
/// verbatim so they can be shown to the user as-is.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required or token rejected
    #[error("{0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("{0}")]
    Forbidden(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Duplicate resource, e.g. already a member
    #[error("{0}")]
    Conflict(String),

    /// Any other backend refusal
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Local form validation, no request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Local store failure
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Submission for this club is already in flight
    #[error("A submission for club {club_id} is already in progress")]
    Busy { club_id: i64 },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Http(err)
        }
    }
}

impl From<EnvelopeError> for ClientError {
    fn from(err: EnvelopeError) -> Self {
        ClientError::InvalidResponse(err.to_string())
    }
}

impl ClientError {
    /// Network-level failure; the request may never have reached the backend
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Http(_) | ClientError::Timeout)
    }

    /// Backend answered and refused
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized(_)
                | ClientError::Forbidden(_)
                | ClientError::NotFound(_)
                | ClientError::Conflict(_)
                | ClientError::Rejected { .. }
        )
    }

    /// Unified error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Http(_) => ErrorCode::NetworkError,
            ClientError::Timeout => ErrorCode::TimeoutError,
            ClientError::InvalidResponse(_) => ErrorCode::InvalidResponse,
            ClientError::Unauthorized(_) => ErrorCode::NotAuthenticated,
            ClientError::Forbidden(_) => ErrorCode::PermissionDenied,
            ClientError::NotFound(_) => ErrorCode::NotFound,
            ClientError::Conflict(_) => ErrorCode::AlreadyExists,
            ClientError::Rejected { status, .. } => http::StatusCode::from_u16(*status)
                .map(ErrorCode::from_http_status)
                .unwrap_or(ErrorCode::Unknown),
            ClientError::Validation(e) => e.code(),
            ClientError::Storage(_) => ErrorCode::StorageError,
            ClientError::Config(_) => ErrorCode::ConfigError,
            ClientError::Serialization(_) => ErrorCode::InvalidFormat,
            ClientError::Busy { .. } => ErrorCode::SubmissionInProgress,
        }
    }

    /// Message to show the user
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http(_) => "Network error. Please check your connection and try again.".into(),
            ClientError::Timeout => "The server took too long to respond. Please try again.".into(),
            other => other.to_string(),
        }
    }

    /// Convert into the shared error shape a front end renders
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::with_message(self.code(), self.user_message());
        match self {
            ClientError::Validation(v) => err.with_detail("field", v.field.as_str()),
            ClientError::Rejected { status, .. } => err.with_detail("status", *status),
            ClientError::Busy { club_id } => err.with_detail("clubId", *club_id),
            _ => err,
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        err.to_app_error()
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
