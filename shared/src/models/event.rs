//! Event Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Club;

/// Club event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub event_date: NaiveDateTime,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub club_id: Option<i64>,
    /// Some endpoints embed the owning club
    #[serde(default)]
    pub club: Option<Club>,
}

impl Event {
    /// Owning club id, from whichever form the backend sent
    pub fn owner_club_id(&self) -> Option<i64> {
        self.club_id.or_else(|| self.club.as_ref().map(|c| c.id))
    }
}

/// Create / update event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub title: String,
    pub description: String,
    pub event_date: NaiveDateTime,
    pub location: String,
    pub club_id: i64,
}
