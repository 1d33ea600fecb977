//! Unified error system for UniVerse
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Club and event errors
//! - 4xxx: Membership errors
//! - 5xxx: Payment errors
//! - 6xxx: Announcement and upload errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "Please enter a valid phone number")
//!     .with_detail("field", "contactNumber");
//! assert_eq!(err.details.unwrap()["field"], "contactNumber");
//! assert!(!err.code.is_retryable());
//! ```

mod codes;
mod http;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::AppError;
