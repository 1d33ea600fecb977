//! Club membership workflow
//!
//! ```text
//! submit ──validate──► free club ──join-with-details──► Joined
//!                  └─► paid club ──hand-off──► ExternalCheckout(url)
//!                                                   │
//!            success redirect ◄─────────────────────┤
//!            ConfirmationFlow: AwaitingSession → Confirming → Succeeded | Pending | Failed
//!                                                   │
//!            cancel redirect ◄──────────────────────┘  handle_cancel → CancelView
//! ```
//!
//! The draft parked across the redirect lives in [`crate::store::ClientStore`].

pub mod catalog;
mod confirmation;
pub mod form;
mod handoff;
pub mod redirect;
mod workflow;

pub use catalog::{Faculty, Skill, StudyYear};
pub use confirmation::{
    CancelAction, CancelView, ConfirmationFlow, ConfirmationOutcome, ConfirmationState,
    Finalization,
};
pub use form::{
    ApplicationInput, Field, MembershipApplication, ValidationError, ValidationKind, validate,
    validate_all, validate_field,
};
pub use workflow::{MembershipWorkflow, SubmitOutcome};

/// Where the front end should go next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Leave the app for the hosted checkout page
    ExternalCheckout { url: String },
    ClubDetails {
        club_id: i64,
        /// Open the membership form on arrival
        reopen_membership_form: bool,
    },
    Clubs,
    Home,
    Login,
}

impl Navigation {
    /// Front-end route for in-app destinations
    pub fn route(&self) -> String {
        match self {
            Navigation::ExternalCheckout { url } => url.clone(),
            Navigation::ClubDetails {
                club_id,
                reopen_membership_form: true,
            } => format!("/clubs/{}?openMembershipForm=true", club_id),
            Navigation::ClubDetails { club_id, .. } => format!("/clubs/{}", club_id),
            Navigation::Clubs => "/clubs".to_string(),
            Navigation::Home => "/".to_string(),
            Navigation::Login => "/login".to_string(),
        }
    }
}
