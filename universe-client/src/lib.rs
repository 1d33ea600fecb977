//! UniVerse Client - typed SDK for the UniVerse club backend
//!
//! Provides the HTTP boundary to the REST API, the session and role guard,
//! and the club membership workflow including the paid-checkout hand-off.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod membership;
pub mod session;
pub mod store;

pub use api::Api;
pub use client::UniverseClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use membership::{
    ApplicationInput, ConfirmationFlow, ConfirmationOutcome, Finalization, MembershipWorkflow,
    Navigation, SubmitOutcome,
};
pub use session::{Access, Session, authorize};
pub use store::{ClientStore, StoreError};

// Re-export shared types for convenience
pub use shared::models::{Club, Membership, Payment, PaymentStatus, Role, User};
