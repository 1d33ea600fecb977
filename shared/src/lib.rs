//! Shared types for UniVerse
//!
//! Wire types used by the client: entities, request payloads, the backend
//! response envelope and the unified error codes.

pub mod client;
pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use response::{Envelope, EnvelopeError};
