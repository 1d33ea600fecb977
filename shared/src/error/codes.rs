//! Unified error codes for UniVerse
//!
//! Every failure the client can surface maps onto one of these codes.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Club and event errors
//! - 4xxx: Membership errors
//! - 5xxx: Payment errors
//! - 6xxx: Announcement and upload errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they serialize compactly
/// and stay stable across front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Session has expired
    SessionExpired = 1005,
    /// Email is already registered
    EmailAlreadyRegistered = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Super admin role required
    SuperAdminRequired = 2003,
    /// Club admin role required
    ClubAdminRequired = 2004,

    // ==================== 3xxx: Club / Event ====================
    /// Club not found
    ClubNotFound = 3001,
    /// Club name already exists
    ClubNameExists = 3002,
    /// Event not found
    EventNotFound = 3101,

    // ==================== 4xxx: Membership ====================
    /// Membership not found
    MembershipNotFound = 4001,
    /// User is already a member of the club
    AlreadyMember = 4002,
    /// Backend refused to create the membership
    MembershipRejected = 4003,
    /// No stored application draft
    DraftNotFound = 4004,
    /// A submission for this club is already in flight
    SubmissionInProgress = 4005,

    // ==================== 5xxx: Payment ====================
    /// Payment failed
    PaymentFailed = 5001,
    /// Payment not found
    PaymentNotFound = 5002,
    /// Payment is still being processed
    PaymentPending = 5003,
    /// Payment was cancelled
    PaymentCancelled = 5004,
    /// Checkout session could not be created
    CheckoutSessionFailed = 5005,
    /// Return URL carried no payment session
    PaymentSessionMissing = 5006,
    /// Payment already produced a membership
    PaymentAlreadyFinalized = 5007,

    // ==================== 6xxx: Announcement / Upload ====================
    /// Announcement not found
    AnnouncementNotFound = 6001,
    /// File too large
    FileTooLarge = 6501,
    /// Empty file
    EmptyFile = 6502,
    /// Invalid image file
    InvalidImageFile = 6503,
    /// Upload failed
    UploadFailed = 6504,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Local storage error
    StorageError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Backend returned an unexpected payload
    InvalidResponse = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Transient failures the user may retry by hand
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCode::NetworkError
                | ErrorCode::TimeoutError
                | ErrorCode::PaymentPending
                | ErrorCode::SubmissionInProgress
                | ErrorCode::CheckoutSessionFailed
        )
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::SessionExpired => "Session has expired",
            ErrorCode::EmailAlreadyRegistered => "Email is already registered",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::SuperAdminRequired => "Super admin role is required",
            ErrorCode::ClubAdminRequired => "Club admin role is required",

            // Club / Event
            ErrorCode::ClubNotFound => "Club not found",
            ErrorCode::ClubNameExists => "Club name already exists",
            ErrorCode::EventNotFound => "Event not found",

            // Membership
            ErrorCode::MembershipNotFound => "Membership not found",
            ErrorCode::AlreadyMember => "You are already a member of this club",
            ErrorCode::MembershipRejected => "Membership could not be created",
            ErrorCode::DraftNotFound => "No saved membership application found",
            ErrorCode::SubmissionInProgress => "A submission is already in progress",

            // Payment
            ErrorCode::PaymentFailed => "Payment failed",
            ErrorCode::PaymentNotFound => "Payment not found",
            ErrorCode::PaymentPending => "Payment is still being processed",
            ErrorCode::PaymentCancelled => "Payment was cancelled",
            ErrorCode::CheckoutSessionFailed => "Failed to create checkout session",
            ErrorCode::PaymentSessionMissing => "No payment session found",
            ErrorCode::PaymentAlreadyFinalized => "Payment has already been used for a membership",

            // Announcement / Upload
            ErrorCode::AnnouncementNotFound => "Announcement not found",
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::UploadFailed => "File upload failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageError => "Local storage error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::InvalidResponse => "Unexpected response from server",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::SessionExpired),
            1006 => Ok(ErrorCode::EmailAlreadyRegistered),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::SuperAdminRequired),
            2004 => Ok(ErrorCode::ClubAdminRequired),

            // Club / Event
            3001 => Ok(ErrorCode::ClubNotFound),
            3002 => Ok(ErrorCode::ClubNameExists),
            3101 => Ok(ErrorCode::EventNotFound),

            // Membership
            4001 => Ok(ErrorCode::MembershipNotFound),
            4002 => Ok(ErrorCode::AlreadyMember),
            4003 => Ok(ErrorCode::MembershipRejected),
            4004 => Ok(ErrorCode::DraftNotFound),
            4005 => Ok(ErrorCode::SubmissionInProgress),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5002 => Ok(ErrorCode::PaymentNotFound),
            5003 => Ok(ErrorCode::PaymentPending),
            5004 => Ok(ErrorCode::PaymentCancelled),
            5005 => Ok(ErrorCode::CheckoutSessionFailed),
            5006 => Ok(ErrorCode::PaymentSessionMissing),
            5007 => Ok(ErrorCode::PaymentAlreadyFinalized),

            // Announcement / Upload
            6001 => Ok(ErrorCode::AnnouncementNotFound),
            6501 => Ok(ErrorCode::FileTooLarge),
            6502 => Ok(ErrorCode::EmptyFile),
            6503 => Ok(ErrorCode::InvalidImageFile),
            6504 => Ok(ErrorCode::UploadFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::InvalidResponse),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
