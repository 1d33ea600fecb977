//! Membership submission

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use dashmap::{DashMap, DashSet};
use shared::models::{Club, Membership, User};

use super::confirmation::FinalizationClaim;
use super::form::{self, ApplicationInput};
use super::Navigation;
use crate::api::Api;
use crate::store::{ClientStore, DraftState, StoredDraft};
use crate::{ClientConfig, ClientError, ClientResult};

type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// What a successful submit leads to
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Free club, membership created
    Joined(Membership),
    /// Paid club, draft stored, continue on the hosted checkout page
    RedirectToCheckout { url: String },
}

impl SubmitOutcome {
    pub fn navigation(&self) -> Navigation {
        match self {
            SubmitOutcome::Joined(membership) => Navigation::ClubDetails {
                club_id: membership.club_id,
                reopen_membership_form: false,
            },
            SubmitOutcome::RedirectToCheckout { url } => {
                Navigation::ExternalCheckout { url: url.clone() }
            }
        }
    }
}

/// Drives join, checkout hand-off and post-payment finalization
///
/// Clones share the in-flight and finalization guards.
#[derive(Clone)]
pub struct MembershipWorkflow {
    pub(super) api: Api,
    pub(super) store: ClientStore,
    pub(super) config: Arc<ClientConfig>,
    /// Finalizations in progress, by payment id; waiters share the result
    pub(super) finalizing: Arc<DashMap<i64, FinalizationClaim>>,
    submitting: Arc<DashSet<(i64, i64)>>,
    today: Clock,
}

impl std::fmt::Debug for MembershipWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MembershipWorkflow")
            .field("finalizing", &self.finalizing.len())
            .field("submitting", &self.submitting.len())
            .finish_non_exhaustive()
    }
}

/// Marks a (user, club) submission as in flight until dropped
struct InFlight {
    set: Arc<DashSet<(i64, i64)>>,
    key: (i64, i64),
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.set.remove(&self.key);
    }
}

impl MembershipWorkflow {
    pub fn new(api: Api, store: ClientStore, config: ClientConfig) -> Self {
        Self {
            api,
            store,
            config: Arc::new(config),
            finalizing: Arc::new(DashMap::new()),
            submitting: Arc::new(DashSet::new()),
            today: Arc::new(|| Local::now().date_naive()),
        }
    }

    /// Replace the date used for age checks
    pub fn with_today(mut self, today: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.today = Arc::new(today);
        self
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn store(&self) -> &ClientStore {
        &self.store
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(super) fn today(&self) -> NaiveDate {
        (self.today)()
    }

    /// Validate and submit a membership application
    ///
    /// Free clubs are joined directly. Paid clubs park the application in
    /// the store and return the hosted checkout URL.
    pub async fn submit(
        &self,
        user: &User,
        club: &Club,
        input: &ApplicationInput,
    ) -> ClientResult<SubmitOutcome> {
        let application = form::validate(input, self.today())?;

        let key = (user.id, club.id);
        if !self.submitting.insert(key) {
            return Err(ClientError::Busy { club_id: club.id });
        }
        let _in_flight = InFlight {
            set: self.submitting.clone(),
            key,
        };

        if !club.requires_payment() {
            let request = application.to_request(user.id, club.id, None);
            let membership = self.api.join_with_details(&request).await.map_err(|e| {
                tracing::warn!(user_id = user.id, club_id = club.id, error = %e, "Join rejected");
                e
            })?;
            self.clear_stale_draft(user.id, club.id)?;
            tracing::info!(
                user_id = user.id,
                club_id = club.id,
                membership_id = membership.id,
                "Joined free club"
            );
            return Ok(SubmitOutcome::Joined(membership));
        }

        match self.begin_checkout(user.id, club, application).await? {
            Navigation::ExternalCheckout { url } => Ok(SubmitOutcome::RedirectToCheckout { url }),
            other => Err(ClientError::InvalidResponse(format!(
                "unexpected hand-off destination {}",
                other.route()
            ))),
        }
    }

    /// Stored draft for (user, club), for pre-filling the form
    pub fn draft(&self, user_id: i64, club_id: i64) -> ClientResult<Option<StoredDraft>> {
        Ok(self.store.draft(user_id, club_id)?)
    }

    /// Drafts whose payment succeeded but whose membership was not created
    pub fn unfinished_payments(&self) -> ClientResult<Vec<StoredDraft>> {
        Ok(self
            .store
            .drafts()?
            .into_iter()
            .filter(|d| d.state == DraftState::AwaitingFinalization)
            .collect())
    }

    /// A draft left from an unpaid checkout is obsolete once the user joins;
    /// one that already has a succeeded payment is kept for support.
    fn clear_stale_draft(&self, user_id: i64, club_id: i64) -> ClientResult<()> {
        if let Some(draft) = self.store.draft(user_id, club_id)? {
            if draft.state != DraftState::AwaitingFinalization {
                self.store.remove_draft(user_id, club_id)?;
                tracing::debug!(user_id, club_id, attempt_id = %draft.attempt_id, "Cleared stale draft");
            }
        }
        Ok(())
    }
}
