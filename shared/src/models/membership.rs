//! Club Membership Model

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Membership status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStatus {
    Active,
    Inactive,
}

/// Membership entity, created exactly once per join attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: i64,
    pub user_id: i64,
    pub club_id: i64,
    pub status: MembershipStatus,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    /// Skills as the backend stores them: a JSON array inside a string
    #[serde(default)]
    pub skills_json: Option<String>,
    #[serde(default)]
    pub joined_at: Option<NaiveDateTime>,
}

impl Membership {
    /// Decoded skills; empty when absent or malformed
    pub fn skills(&self) -> Vec<String> {
        self.skills_json
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }

    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Active
    }
}

/// Plain join (no application details)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub user_id: i64,
    pub club_id: i64,
}

/// Join with application details
///
/// Sent to `join-with-details` (free clubs) and, with `payment_id` set, to
/// `join-after-payment-with-details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRequest {
    pub user_id: i64,
    pub club_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<i64>,
    pub full_name: String,
    pub address: String,
    pub contact_number: String,
    pub birthday: NaiveDate,
    pub faculty: String,
    pub year: String,
    pub skills: Vec<String>,
}
