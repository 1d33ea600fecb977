//! Club endpoints

use shared::models::{Club, ClubRequest, Event};

use super::{Api, with_query};
use crate::ClientResult;

impl Api {
    pub async fn clubs(&self) -> ClientResult<Vec<Club>> {
        self.get_list("clubs", "clubs").await
    }

    pub async fn club(&self, club_id: i64) -> ClientResult<Club> {
        self.get_keyed(&format!("clubs/{}", club_id), "club").await
    }

    /// Name search (`clubs/search?name=`)
    pub async fn search_clubs(&self, name: &str) -> ClientResult<Vec<Club>> {
        let path = with_query("clubs/search", &[("name", name.trim())]);
        self.get_list(&path, "clubs").await
    }

    /// Clubs managed by a club admin
    pub async fn clubs_by_admin(&self, admin_id: i64) -> ClientResult<Vec<Club>> {
        self.get_list(&format!("clubs/admin/{}", admin_id), "clubs")
            .await
    }

    pub async fn create_club(&self, request: &ClubRequest) -> ClientResult<Club> {
        self.post_keyed("clubs", request, "club").await
    }

    pub async fn update_club(&self, club_id: i64, request: &ClubRequest) -> ClientResult<Club> {
        self.put_keyed(&format!("clubs/{}", club_id), request, "club")
            .await
    }

    pub async fn delete_club(&self, club_id: i64) -> ClientResult<String> {
        self.delete_ack(&format!("clubs/{}", club_id)).await
    }

    /// Events hosted by a club
    pub async fn club_events(&self, club_id: i64) -> ClientResult<Vec<Event>> {
        self.events_by_club(club_id).await
    }
}
