use crate::framework::{EntityStore, Refresh, ResourceStore};
use crate::model::{Reservation, ReservationDraft};
use crate::reservation_store::ReservationAction;
use std::fmt::Display;
use tracing::{debug, info, instrument};

/// Store for reservations, including the check-in/check-out transitions.
#[derive(Clone)]
pub struct ReservationStore {
    inner: ResourceStore<Reservation>,
}

impl EntityStore<Reservation> for ReservationStore {
    fn inner(&self) -> &ResourceStore<Reservation> {
        &self.inner
    }
}

impl ReservationStore {
    pub fn new(inner: ResourceStore<Reservation>) -> Self {
        Self { inner }
    }

    pub fn reservations(&self) -> Vec<Reservation> {
        self.inner.items()
    }

    pub fn current_reservation(&self) -> Option<Reservation> {
        self.inner.current()
    }

    pub async fn fetch_reservations(&self) {
        self.inner.fetch_all().await
    }

    pub async fn fetch_reservations_by_user_id(&self, user_id: impl Display) {
        self.inner.fetch_by_filter("userId", user_id).await
    }

    pub async fn fetch_reservations_by_hotel_id(&self, hotel_id: impl Display) {
        self.inner.fetch_by_filter("hotelId", hotel_id).await
    }

    pub async fn fetch_reservations_by_room_id(&self, room_id: impl Display) {
        self.inner.fetch_by_filter("roomId", room_id).await
    }

    pub async fn fetch_reservation_by_id(&self, id: i64) {
        self.inner.fetch_by_id(&id).await
    }

    /// Books a stay, then reloads the guest's reservations.
    #[instrument(skip(self, draft), fields(user_id = draft.user_id, room_id = draft.room_id))]
    pub async fn create_reservation(&self, draft: &ReservationDraft) -> bool {
        debug!(?draft, "create_reservation called");
        self.inner
            .create(draft, Refresh::filter("userId", draft.user_id))
            .await
    }

    pub async fn update_reservation(&self, id: i64, draft: &ReservationDraft) -> bool {
        self.inner.update(&id, draft, Refresh::All).await
    }

    pub async fn delete_reservation(&self, id: i64) -> bool {
        self.inner.delete(&id, Refresh::All).await
    }

    pub async fn check_in(&self, id: i64) -> bool {
        self.apply(id, ReservationAction::CheckIn).await
    }

    pub async fn check_out(&self, id: i64) -> bool {
        self.apply(id, ReservationAction::CheckOut).await
    }

    /// Runs a transition, then reloads every reservation.
    #[instrument(skip(self))]
    pub async fn apply(&self, id: i64, action: ReservationAction) -> bool {
        let ok = self
            .inner
            .transition(&id, action.segment(), Refresh::All)
            .await;
        if ok {
            info!(id, expected = %action.target_status(), "Transition accepted");
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockTransport;
    use crate::framework::{HttpClient, MemorySession, Method};
    use crate::lifecycle::config::ClientConfig;
    use crate::model::ReservationStatus;
    use serde_json::json;
    use std::sync::Arc;

    fn store(mock: &MockTransport) -> ReservationStore {
        let http = HttpClient::new(mock.transport(), Arc::new(MemorySession::new()));
        crate::reservation_store::new(http, &ClientConfig::default())
    }

    #[tokio::test]
    async fn test_check_out_patches_then_reloads() {
        let mock = MockTransport::new();
        mock.expect(Method::Patch, "/bookings/3/check-out").return_ok(json!(null));
        mock.expect(Method::Get, "/bookings")
            .return_ok(json!([{ "id": 3, "status": "checked-out" }]));

        let reservations = store(&mock);
        assert!(reservations.check_out(3).await);

        assert_eq!(reservations.reservations()[0].status, ReservationStatus::CheckedOut);
        assert!(!reservations.loading());
        mock.verify();
    }

    #[tokio::test]
    async fn test_rejected_check_in_returns_false() {
        let mock = MockTransport::new();
        mock.expect(Method::Patch, "/bookings/3/check-in").return_status(409, "already checked in");

        let reservations = store(&mock);
        assert!(!reservations.check_in(3).await);
        assert_eq!(reservations.errors()[0].status(), Some(409));
        mock.verify();
    }

    #[tokio::test]
    async fn test_create_reloads_guest_reservations_from_server() {
        let mock = MockTransport::new();
        mock.expect(Method::Post, "/bookings").return_ok(json!({ "id": 10 }));
        mock.expect(Method::Get, "/bookings").return_ok(json!([{ "id": 10, "userId": 6 }]));

        let reservations = store(&mock);
        let draft = ReservationDraft {
            user_id: 6,
            room_id: 2,
            hotel_id: 1,
            check_in_date: "2026-11-01".into(),
            check_out_date: "2026-11-03".into(),
            ..ReservationDraft::default()
        };

        assert!(reservations.create_reservation(&draft).await);
        let sent = mock.requests();
        assert_eq!(sent[0].body.as_ref().unwrap()["status"], "pending");
        assert_eq!(sent[1].query, vec![("userId".to_string(), "6".to_string())]);
        assert_eq!(reservations.reservations().len(), 1);
    }

    #[tokio::test]
    async fn test_filter_by_room_uses_server_query() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/bookings").return_ok(json!({ "data": [{ "id": 1, "roomId": 8 }] }));

        let reservations = store(&mock);
        reservations.fetch_reservations_by_room_id(8).await;

        assert_eq!(mock.requests()[0].query, vec![("roomId".to_string(), "8".to_string())]);
        assert_eq!(reservations.reservations().len(), 1);
    }
}
