use crate::framework::{EntityStore, Refresh, ResourceStore};
use crate::model::{Room, RoomDraft};
use std::fmt::Display;
use tracing::{debug, instrument};

/// Store for rooms. Writes reload the rooms of the affected hotel.
#[derive(Clone)]
pub struct RoomStore {
    inner: ResourceStore<Room>,
}

impl EntityStore<Room> for RoomStore {
    fn inner(&self) -> &ResourceStore<Room> {
        &self.inner
    }
}

impl RoomStore {
    pub fn new(inner: ResourceStore<Room>) -> Self {
        Self { inner }
    }

    pub fn rooms(&self) -> Vec<Room> {
        self.inner.items()
    }

    pub fn current_room(&self) -> Option<Room> {
        self.inner.current()
    }

    pub async fn fetch_rooms(&self) {
        self.inner.fetch_all().await
    }

    /// Rooms of one hotel. `"3"` and `3` select the same hotel.
    pub async fn fetch_rooms_by_hotel_id(&self, hotel_id: impl Display) {
        self.inner.fetch_by_filter("hotelId", hotel_id).await
    }

    pub async fn fetch_room_by_id(&self, id: i64) {
        self.inner.fetch_by_id(&id).await
    }

    #[instrument(skip(self, draft), fields(hotel_id = draft.hotel_id))]
    pub async fn create_room(&self, draft: &RoomDraft) -> bool {
        debug!(?draft, "create_room called");
        self.inner
            .create(draft, Refresh::filter("hotelId", draft.hotel_id))
            .await
    }

    pub async fn update_room(&self, id: i64, draft: &RoomDraft) -> bool {
        self.inner
            .update(&id, draft, Refresh::filter("hotelId", draft.hotel_id))
            .await
    }

    /// Deletes a room, then reloads its hotel's rooms if that hotel is known
    /// locally, otherwise every room.
    #[instrument(skip(self))]
    pub async fn delete_room(&self, id: i64) -> bool {
        let refresh = match self.inner.find(&id).and_then(|room| room.hotel_id) {
            Some(hotel_id) => Refresh::filter("hotelId", hotel_id),
            None => {
                debug!("Hotel of room unknown, reloading all rooms");
                Refresh::All
            }
        };
        self.inner.delete(&id, refresh).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockTransport;
    use crate::framework::{HttpClient, MemorySession, Method};
    use crate::lifecycle::config::ClientConfig;
    use serde_json::json;
    use std::sync::Arc;

    fn store(mock: &MockTransport) -> RoomStore {
        let http = HttpClient::new(mock.transport(), Arc::new(MemorySession::new()));
        crate::room_store::new(http, &ClientConfig::default())
    }

    fn rooms_body() -> serde_json::Value {
        json!([
            { "id": 1, "hotelId": 3 },
            { "id": 2, "hotelId": 4 },
            { "id": 5, "hotelId": 3 }
        ])
    }

    #[tokio::test]
    async fn test_create_reloads_rooms_of_draft_hotel() {
        let mock = MockTransport::new();
        mock.expect(Method::Post, "/rooms").return_ok(json!({ "id": 5, "hotelId": 3 }));
        mock.expect(Method::Get, "/rooms").return_ok(rooms_body());

        let rooms = store(&mock);
        let draft = RoomDraft {
            room_type: "double".into(),
            price: 75.0,
            hotel_id: 3,
            ..RoomDraft::default()
        };

        assert!(rooms.create_room(&draft).await);
        let ids: Vec<_> = rooms.rooms().into_iter().filter_map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 5]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_delete_known_room_reloads_its_hotel() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/rooms").return_ok(rooms_body());
        mock.expect(Method::Delete, "/rooms/2").return_ok(json!(null));
        mock.expect(Method::Get, "/rooms").return_ok(json!([{ "id": 1, "hotelId": 3 }, { "id": 5, "hotelId": 3 }]));

        let rooms = store(&mock);
        rooms.fetch_rooms().await;

        assert!(rooms.delete_room(2).await);
        // Room 2 lived in hotel 4, which now has no rooms left.
        assert!(rooms.rooms().is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_delete_unknown_room_reloads_everything() {
        let mock = MockTransport::new();
        mock.expect(Method::Delete, "/rooms/9").return_ok(json!(null));
        mock.expect(Method::Get, "/rooms").return_ok(rooms_body());

        let rooms = store(&mock);
        assert!(rooms.delete_room(9).await);
        assert_eq!(rooms.rooms().len(), 3);
        mock.verify();
    }
}
