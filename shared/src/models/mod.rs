//! Data models
//!
//! Entities are owned by the backend; the client only holds copies.
//! JSON field names are camelCase and all IDs are `i64`.

pub mod announcement;
pub mod club;
pub mod event;
pub mod membership;
pub mod payment;
pub mod upload;
pub mod user;

// Re-exports
pub use announcement::*;
pub use club::*;
pub use event::*;
pub use membership::*;
pub use payment::*;
pub use upload::*;
pub use user::*;
