//! Payment confirmation and membership finalization
//!
//! After the success redirect the payment is looked up by session id and
//! confirmed with the backend. A succeeded payment turns the stored draft
//! into a membership exactly once per payment id: an in-memory guard covers
//! concurrent calls, a `finalized_payments` record covers restarts.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use shared::error::ErrorCode;
use shared::models::{Membership, Payment, PaymentStatus};
use tokio::sync::OnceCell;
use tokio::time::{Instant, sleep, timeout};

use super::Navigation;
use super::redirect;
use super::workflow::MembershipWorkflow;
use crate::api::Confirmation;
use crate::store::{FinalizedRecord, StoredDraft};
use crate::{ClientError, ClientResult};

/// Confirmation page state
///
/// `AwaitingSession → Confirming → {Succeeded, Pending, Failed, Errored}`;
/// never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationState {
    AwaitingSession,
    Confirming,
    Succeeded,
    Pending,
    Failed,
    Errored,
}

impl ConfirmationState {
    fn rank(&self) -> u8 {
        match self {
            ConfirmationState::AwaitingSession => 0,
            ConfirmationState::Confirming => 1,
            _ => 2,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.rank() == 2
    }
}

/// Result of turning a succeeded payment into a membership
#[derive(Debug, Clone, PartialEq)]
pub enum Finalization {
    Created(Membership),
    /// This payment already produced a membership
    AlreadyFinalized,
    /// Payment without a stored application
    NoDraft,
    /// Backend refused; the draft is kept with its payment id
    Rejected { message: String },
}

impl Finalization {
    pub fn user_message(&self) -> String {
        match self {
            Finalization::Created(_) => {
                "Payment successful! Your membership has been created.".to_string()
            }
            Finalization::AlreadyFinalized => {
                "Payment successful! Your membership is already active.".to_string()
            }
            Finalization::NoDraft => "Payment completed successfully!".to_string(),
            Finalization::Rejected { message } => format!(
                "Payment successful, but there was an issue creating your membership ({}). Please contact support.",
                message
            ),
        }
    }
}

/// Shared slot for one payment's finalization result
pub(crate) type FinalizationClaim = Arc<OnceCell<Finalization>>;

/// Actions offered on the cancellation view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelAction {
    /// Back to the club with the form pre-filled from the stored draft
    Retry,
    BrowseClubs,
    Home,
}

/// Cancelled or failed checkout
#[derive(Debug, Clone, PartialEq)]
pub struct CancelView {
    pub session_id: Option<String>,
    pub club_id: Option<i64>,
    /// The stored application survives; retrying needs no re-entry
    pub draft_retained: bool,
    pub message: String,
    pub actions: Vec<CancelAction>,
}

impl CancelView {
    pub fn navigation(&self, action: CancelAction) -> Navigation {
        match (action, self.club_id) {
            (CancelAction::Retry, Some(club_id)) => Navigation::ClubDetails {
                club_id,
                reopen_membership_form: true,
            },
            (CancelAction::Retry, None) | (CancelAction::BrowseClubs, _) => Navigation::Clubs,
            (CancelAction::Home, _) => Navigation::Home,
        }
    }
}

/// What the confirmation page shows
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmationOutcome {
    Succeeded {
        payment: Payment,
        finalization: Finalization,
        next: Navigation,
    },
    /// Soft success; the user goes back to the club page
    Pending { payment: Payment, next: Navigation },
    Failed { payment: Payment, view: CancelView },
    /// Lookup or confirmation failed; nothing was retried
    Error { message: String, next: Navigation },
}

impl ConfirmationOutcome {
    pub fn next(&self) -> Navigation {
        match self {
            ConfirmationOutcome::Succeeded { next, .. }
            | ConfirmationOutcome::Pending { next, .. }
            | ConfirmationOutcome::Error { next, .. } => next.clone(),
            ConfirmationOutcome::Failed { view, .. } => view.navigation(CancelAction::Home),
        }
    }
}

/// One confirmation page visit
///
/// [`ConfirmationFlow::run`] does the work once; later calls (re-renders)
/// return the cached outcome.
#[derive(Debug, Clone)]
pub struct ConfirmationFlow {
    session_id: Option<String>,
    state: ConfirmationState,
    outcome: Option<ConfirmationOutcome>,
}

impl ConfirmationFlow {
    /// Start from the success redirect URL or its query string
    pub fn from_redirect(redirect: &str) -> Self {
        Self {
            session_id: redirect::session_id(redirect),
            state: ConfirmationState::AwaitingSession,
            outcome: None,
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn state(&self) -> ConfirmationState {
        self.state
    }

    pub fn outcome(&self) -> Option<&ConfirmationOutcome> {
        self.outcome.as_ref()
    }

    fn advance(&mut self, next: ConfirmationState) {
        if self.state.is_terminal() || next.rank() <= self.state.rank() {
            tracing::debug!(from = ?self.state, to = ?next, "Ignored backward transition");
            return;
        }
        tracing::debug!(from = ?self.state, to = ?next, "Confirmation state");
        self.state = next;
    }

    pub async fn run(&mut self, workflow: &MembershipWorkflow) -> ConfirmationOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }
        let outcome = self.drive(workflow).await;
        self.outcome = Some(outcome.clone());
        outcome
    }

    async fn drive(&mut self, workflow: &MembershipWorkflow) -> ConfirmationOutcome {
        let Some(session_id) = self.session_id.clone() else {
            self.advance(ConfirmationState::Errored);
            return ConfirmationOutcome::Error {
                message: format!("{}. Please try again.", ErrorCode::PaymentSessionMissing.message()),
                next: Navigation::Home,
            };
        };

        self.advance(ConfirmationState::Confirming);
        let confirmation = match workflow.lookup_and_confirm(&session_id).await {
            Ok(confirmation) => confirmation,
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "Payment confirmation failed");
                self.advance(ConfirmationState::Errored);
                return ConfirmationOutcome::Error {
                    message: e.user_message(),
                    next: Navigation::Home,
                };
            }
        };

        let payment = confirmation.payment;
        match confirmation.status {
            PaymentStatus::Succeeded => {
                self.advance(ConfirmationState::Succeeded);
                let next = Navigation::ClubDetails {
                    club_id: payment.club_id,
                    reopen_membership_form: false,
                };
                match workflow.finalize(&payment, Some(&session_id)).await {
                    Ok(finalization) => ConfirmationOutcome::Succeeded {
                        payment,
                        finalization,
                        next,
                    },
                    Err(e) => ConfirmationOutcome::Error {
                        message: Finalization::Rejected {
                            message: e.user_message(),
                        }
                        .user_message(),
                        next: Navigation::Home,
                    },
                }
            }
            PaymentStatus::Pending | PaymentStatus::Unknown => {
                self.advance(ConfirmationState::Pending);
                tracing::info!(payment_id = payment.id, "Payment still pending");
                ConfirmationOutcome::Pending {
                    next: Navigation::ClubDetails {
                        club_id: payment.club_id,
                        reopen_membership_form: true,
                    },
                    payment,
                }
            }
            PaymentStatus::Failed | PaymentStatus::Cancelled | PaymentStatus::Refunded => {
                self.advance(ConfirmationState::Failed);
                let draft_retained = match workflow.store.draft(payment.user_id, payment.club_id) {
                    Ok(draft) => draft.is_some(),
                    Err(e) => {
                        tracing::warn!(payment_id = payment.id, error = %e, "Could not read stored draft");
                        false
                    }
                };
                let view = CancelView {
                    session_id: Some(session_id),
                    club_id: Some(payment.club_id),
                    draft_retained,
                    message: format!("Payment status: {}", payment.status),
                    actions: vec![CancelAction::Retry, CancelAction::BrowseClubs, CancelAction::Home],
                };
                ConfirmationOutcome::Failed { payment, view }
            }
        }
    }
}

impl MembershipWorkflow {
    async fn lookup_and_confirm(&self, session_id: &str) -> ClientResult<Confirmation> {
        let payment = self.api.payment_by_session(session_id).await?;
        tracing::info!(payment_id = payment.id, status = %payment.status, "Payment found for session");
        if payment.status == PaymentStatus::Succeeded && self.store.is_finalized(payment.id)? {
            // Already settled; confirming again changes nothing
            return Ok(Confirmation {
                status: payment.status,
                payment,
                message: None,
            });
        }
        self.confirm_with_budget(payment.id).await
    }

    /// Confirm, repeating while the processor reports PENDING
    ///
    /// Bounded by `confirm_attempts` and `confirm_timeout`. A timeout after
    /// at least one answer returns that answer; transport errors are not retried.
    pub(super) async fn confirm_with_budget(&self, payment_id: i64) -> ClientResult<Confirmation> {
        let deadline = Instant::now() + self.config.confirm_timeout;
        let attempts = self.config.confirm_attempts.max(1);
        let mut last: Option<Confirmation> = None;

        for attempt in 1..=attempts {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let confirmation = match timeout(remaining, self.api.confirm_payment(payment_id)).await {
                Ok(result) => result?,
                Err(_) => return last.ok_or(ClientError::Timeout),
            };
            tracing::debug!(payment_id, attempt, status = %confirmation.status, "Confirm attempt");

            if confirmation.status != PaymentStatus::Pending
                || attempt == attempts
                || Instant::now() + self.config.confirm_interval >= deadline
            {
                return Ok(confirmation);
            }
            last = Some(confirmation);
            sleep(self.config.confirm_interval).await;
        }

        last.ok_or(ClientError::Timeout)
    }

    /// Create the membership for a succeeded payment, at most once
    ///
    /// Concurrent calls for one payment wait for the first and share its
    /// result; only the durable record makes a payment `AlreadyFinalized`.
    pub(super) async fn finalize(
        &self,
        payment: &Payment,
        session_id: Option<&str>,
    ) -> ClientResult<Finalization> {
        let claim = self.finalizing.entry(payment.id).or_default().clone();
        let owner = AtomicBool::new(false);

        let result = claim
            .get_or_try_init(|| async {
                owner.store(true, Ordering::SeqCst);
                self.finalize_claimed(payment, session_id).await
            })
            .await
            .cloned();

        if !owner.load(Ordering::SeqCst) {
            tracing::info!(payment_id = payment.id, "Joined a finalization already in progress");
            // The first caller created it; for this caller it already exists
            return result.map(|finalization| match finalization {
                Finalization::Created(_) => Finalization::AlreadyFinalized,
                other => other,
            });
        }

        // Later calls start fresh and consult the store
        self.finalizing
            .remove_if(&payment.id, |_, current| Arc::ptr_eq(current, &claim));
        result
    }

    async fn finalize_claimed(
        &self,
        payment: &Payment,
        session_id: Option<&str>,
    ) -> ClientResult<Finalization> {
        if self.store.is_finalized(payment.id)? {
            return Ok(Finalization::AlreadyFinalized);
        }

        let Some(draft) = self.recover_draft(payment, session_id)? else {
            tracing::warn!(payment_id = payment.id, "No stored application for payment");
            return Ok(Finalization::NoDraft);
        };

        let request = draft
            .application
            .to_request(draft.user_id, draft.club_id, Some(payment.id));
        match self.api.join_after_payment_with_details(&request).await {
            Ok(membership) => {
                self.store.finalize(&FinalizedRecord {
                    payment_id: payment.id,
                    membership_id: membership.id,
                    user_id: draft.user_id,
                    club_id: draft.club_id,
                    finalized_at: Utc::now(),
                })?;
                tracing::info!(
                    payment_id = payment.id,
                    membership_id = membership.id,
                    attempt_id = %draft.attempt_id,
                    "Membership created after payment"
                );
                Ok(Finalization::Created(membership))
            }
            Err(e) if e.is_rejection() => {
                let message = e.to_string();
                tracing::warn!(payment_id = payment.id, error = %message, "Membership rejected after payment");
                self.park_for_retry(&draft, payment.id, &message)?;
                Ok(Finalization::Rejected { message })
            }
            Err(e) => {
                self.park_for_retry(&draft, payment.id, &e.to_string())?;
                Err(e)
            }
        }
    }

    /// Session index first, then payment id, then (user, club)
    fn recover_draft(
        &self,
        payment: &Payment,
        session_id: Option<&str>,
    ) -> ClientResult<Option<StoredDraft>> {
        if let Some(session_id) = session_id {
            if let Some(draft) = self.store.draft_by_session(session_id)? {
                return Ok(Some(draft));
            }
        }
        if let Some(draft) = self.store.draft_by_payment(payment.id)? {
            return Ok(Some(draft));
        }
        // A draft tied to another checkout's payment is not this one's
        Ok(self
            .store
            .draft(payment.user_id, payment.club_id)?
            .filter(|draft| draft.payment_id.is_none_or(|id| id == payment.id)))
    }

    fn park_for_retry(&self, draft: &StoredDraft, payment_id: i64, error: &str) -> ClientResult<()> {
        self.store
            .park_for_finalization(draft.user_id, draft.club_id, payment_id, error)?;
        Ok(())
    }

    /// Handle the cancel redirect; the stored draft is left in place
    pub fn handle_cancel(&self, redirect: &str) -> ClientResult<CancelView> {
        let session_id = redirect::session_id(redirect);
        let draft = match &session_id {
            Some(id) => self.store.draft_by_session(id)?,
            None => None,
        };
        tracing::info!(
            session_id = session_id.as_deref().unwrap_or("-"),
            draft_retained = draft.is_some(),
            "Checkout cancelled"
        );
        Ok(CancelView {
            club_id: draft.as_ref().map(|d| d.club_id),
            draft_retained: draft.is_some(),
            session_id,
            message: "Your payment was not completed. No charges have been made.".to_string(),
            actions: vec![CancelAction::Retry, CancelAction::BrowseClubs, CancelAction::Home],
        })
    }

    /// Re-run finalization for a draft whose membership creation failed
    ///
    /// The payment is confirmed again first; anything but SUCCEEDED is refused.
    pub async fn retry_finalization(&self, payment_id: i64) -> ClientResult<Finalization> {
        let confirmation = self.confirm_with_budget(payment_id).await?;
        if confirmation.status != PaymentStatus::Succeeded {
            return Err(ClientError::Rejected {
                status: 402,
                message: format!("Payment status: {}", confirmation.status),
            });
        }
        self.finalize(&confirmation.payment, confirmation.payment.stripe_session_id.as_deref())
            .await
    }
}
