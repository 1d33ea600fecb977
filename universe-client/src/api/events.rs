//! Event endpoints

use shared::models::{Event, EventRequest};

use super::Api;
use crate::ClientResult;

impl Api {
    pub async fn events(&self) -> ClientResult<Vec<Event>> {
        self.get_list("events", "events").await
    }

    pub async fn event(&self, event_id: i64) -> ClientResult<Event> {
        self.get_keyed(&format!("events/{}", event_id), "event").await
    }

    pub async fn events_by_club(&self, club_id: i64) -> ClientResult<Vec<Event>> {
        self.get_list(&format!("events/club/{}", club_id), "events")
            .await
    }

    pub async fn create_event(&self, request: &EventRequest) -> ClientResult<Event> {
        self.post_keyed("events", request, "event").await
    }

    pub async fn update_event(&self, event_id: i64, request: &EventRequest) -> ClientResult<Event> {
        self.put_keyed(&format!("events/{}", event_id), request, "event")
            .await
    }

    pub async fn delete_event(&self, event_id: i64) -> ClientResult<String> {
        self.delete_ack(&format!("events/{}", event_id)).await
    }
}
