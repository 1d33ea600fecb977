//! Announcement Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Club announcement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub club_id: i64,
    pub created_by: i64,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub published_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Create / update announcement payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementRequest {
    pub title: String,
    pub content: String,
    pub club_id: i64,
    pub created_by: i64,
    #[serde(default)]
    pub is_published: bool,
}
