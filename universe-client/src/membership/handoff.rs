//! Payment hand-off
//!
//! The only writer of new drafts: store the validated application, open a
//! checkout session, remember which session and payment it belongs to.

use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{CheckoutSessionRequest, Club};

use super::form::MembershipApplication;
use super::workflow::MembershipWorkflow;
use super::Navigation;
use crate::store::{DraftState, StoredDraft};
use crate::{ClientError, ClientResult};

fn fee(club: &Club) -> ClientResult<Decimal> {
    club.membership_fee
        .filter(|fee| *fee > Decimal::ZERO)
        .ok_or_else(|| {
            ClientError::Conflict(format!("{} does not require a membership fee", club.name))
        })
}

impl MembershipWorkflow {
    pub(super) async fn begin_checkout(
        &self,
        user_id: i64,
        club: &Club,
        application: MembershipApplication,
    ) -> ClientResult<Navigation> {
        let fee = fee(club)?;
        self.ensure_not_awaiting_finalization(user_id, club.id)?;

        let draft = StoredDraft::new(user_id, club.id, application);
        self.store.save_draft(&draft)?;
        tracing::info!(
            user_id,
            club_id = club.id,
            attempt_id = %draft.attempt_id,
            "Draft stored before checkout"
        );

        self.open_checkout(&draft, fee).await
    }

    /// Open a new checkout for the stored draft, without re-entering fields
    pub async fn retry_checkout(&self, user_id: i64, club: &Club) -> ClientResult<Navigation> {
        let fee = fee(club)?;
        let draft = self
            .store
            .draft(user_id, club.id)?
            .ok_or_else(|| ClientError::NotFound(ErrorCode::DraftNotFound.message().to_string()))?;
        if draft.state == DraftState::AwaitingFinalization {
            return Err(already_paid());
        }
        self.open_checkout(&draft, fee).await
    }

    fn ensure_not_awaiting_finalization(&self, user_id: i64, club_id: i64) -> ClientResult<()> {
        match self.store.draft(user_id, club_id)? {
            Some(draft) if draft.state == DraftState::AwaitingFinalization => Err(already_paid()),
            _ => Ok(()),
        }
    }

    async fn open_checkout(&self, draft: &StoredDraft, fee: Decimal) -> ClientResult<Navigation> {
        let request = CheckoutSessionRequest {
            user_id: draft.user_id,
            club_id: draft.club_id,
            amount: fee,
            currency: self.config.currency.clone(),
            success_url: self.config.success_url.clone(),
            cancel_url: self.config.cancel_url.clone(),
        };

        let session = match self.api.create_checkout_session(&request).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(
                    club_id = draft.club_id,
                    attempt_id = %draft.attempt_id,
                    error = %e,
                    "Checkout session not created, draft kept"
                );
                return Err(e);
            }
        };

        self.store.attach_checkout(
            draft.user_id,
            draft.club_id,
            &session.session_id,
            session.payment_id,
        )?;
        tracing::info!(
            club_id = draft.club_id,
            payment_id = session.payment_id,
            session_id = %session.session_id,
            "Redirecting to checkout"
        );

        Ok(Navigation::ExternalCheckout {
            url: session.session_url,
        })
    }
}

fn already_paid() -> ClientError {
    ClientError::Conflict(
        "A payment for this club already succeeded; retry finalization instead".to_string(),
    )
}
