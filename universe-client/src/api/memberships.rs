//! Membership endpoints

use shared::models::{JoinRequest, Membership, MembershipRequest};

use super::{Api, with_query};
use crate::ClientResult;

impl Api {
    /// Plain join without application details
    pub async fn join_club(&self, user_id: i64, club_id: i64) -> ClientResult<Membership> {
        let request = JoinRequest { user_id, club_id };
        self.post_keyed("memberships/join", &request, "membership")
            .await
    }

    /// Join a free club with application details
    pub async fn join_with_details(&self, request: &MembershipRequest) -> ClientResult<Membership> {
        self.post_keyed("memberships/join-with-details", request, "membership")
            .await
    }

    /// Create the membership for a succeeded payment
    ///
    /// `request.payment_id` must be set.
    pub async fn join_after_payment_with_details(
        &self,
        request: &MembershipRequest,
    ) -> ClientResult<Membership> {
        self.post_keyed(
            "memberships/join-after-payment-with-details",
            request,
            "membership",
        )
        .await
    }

    pub async fn leave_club(&self, user_id: i64, club_id: i64) -> ClientResult<String> {
        let (user, club) = (user_id.to_string(), club_id.to_string());
        let path = with_query(
            "memberships/leave",
            &[("userId", user.as_str()), ("clubId", club.as_str())],
        );
        self.delete_ack(&path).await
    }

    pub async fn memberships_by_user(&self, user_id: i64) -> ClientResult<Vec<Membership>> {
        self.get_list(&format!("memberships/user/{}", user_id), "memberships")
            .await
    }

    pub async fn memberships_by_club(&self, club_id: i64) -> ClientResult<Vec<Membership>> {
        self.get_list(&format!("memberships/club/{}", club_id), "memberships")
            .await
    }
}
