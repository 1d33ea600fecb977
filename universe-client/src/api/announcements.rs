//! Announcement endpoints

use shared::models::{Announcement, AnnouncementRequest};

use super::Api;
use crate::ClientResult;

impl Api {
    pub async fn create_announcement(
        &self,
        request: &AnnouncementRequest,
    ) -> ClientResult<Announcement> {
        self.post_keyed("announcements", request, "announcement")
            .await
    }

    pub async fn announcements(&self) -> ClientResult<Vec<Announcement>> {
        self.get_list("announcements", "announcements").await
    }

    pub async fn announcement(&self, announcement_id: i64) -> ClientResult<Announcement> {
        self.get_keyed(&format!("announcements/{}", announcement_id), "announcement")
            .await
    }

    /// Published announcements of a club
    pub async fn club_announcements(&self, club_id: i64) -> ClientResult<Vec<Announcement>> {
        self.get_list(&format!("announcements/club/{}", club_id), "announcements")
            .await
    }

    /// Published and draft announcements of a club
    pub async fn all_club_announcements(&self, club_id: i64) -> ClientResult<Vec<Announcement>> {
        self.get_list(
            &format!("announcements/club/{}/all", club_id),
            "announcements",
        )
        .await
    }

    pub async fn announcements_by_creator(&self, user_id: i64) -> ClientResult<Vec<Announcement>> {
        self.get_list(&format!("announcements/creator/{}", user_id), "announcements")
            .await
    }

    pub async fn club_announcements_by_creator(
        &self,
        club_id: i64,
        user_id: i64,
    ) -> ClientResult<Vec<Announcement>> {
        self.get_list(
            &format!("announcements/club/{}/creator/{}", club_id, user_id),
            "announcements",
        )
        .await
    }

    pub async fn update_announcement(
        &self,
        announcement_id: i64,
        request: &AnnouncementRequest,
    ) -> ClientResult<Announcement> {
        self.put_keyed(
            &format!("announcements/{}", announcement_id),
            request,
            "announcement",
        )
        .await
    }

    pub async fn publish_announcement(&self, announcement_id: i64) -> ClientResult<Announcement> {
        self.post_empty_keyed(
            &format!("announcements/{}/publish", announcement_id),
            "announcement",
        )
        .await
    }

    pub async fn unpublish_announcement(&self, announcement_id: i64) -> ClientResult<Announcement> {
        self.post_empty_keyed(
            &format!("announcements/{}/unpublish", announcement_id),
            "announcement",
        )
        .await
    }

    pub async fn delete_announcement(&self, announcement_id: i64) -> ClientResult<String> {
        self.delete_ack(&format!("announcements/{}", announcement_id))
            .await
    }
}
