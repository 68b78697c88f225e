use hostel_client::framework::mock::MockTransport;
use hostel_client::framework::{EntityStore, MemorySession, Method, TOKEN_KEY, USER_KEY};
use hostel_client::lifecycle::{ClientConfig, HostelSystem};
use hostel_client::model::{Credentials, HotelDraft, ReservationDraft, ReservationStatus, RoomDraft};
use serde_json::json;
use std::sync::Arc;

/// Full manager workflow against a scripted backend.
/// Every store shares the session written by the auth store.
#[tokio::test]
async fn test_manager_workflow_end_to_end() {
    let mock = MockTransport::new();
    let session = MemorySession::new();
    let system = HostelSystem::new(mock.transport(), Arc::new(session.clone()), &ClientConfig::default());

    // Sign in
    mock.expect(Method::Post, "/authentication/sign-in").return_ok(json!({
        "token": "T", "user": { "id": 7, "username": "mara", "names": "Mara", "roles": "Manager" }
    }));
    assert!(system.auth.login(&Credentials::new("mara", "pw")).await);
    assert!(system.auth.has_role("Manager"));

    // Create a hotel, then list the manager's hotels
    mock.expect(Method::Post, "/hotels").return_ok(json!({ "id": 1 }));
    mock.expect(Method::Get, "/hotels").return_ok(json!([{ "id": 1, "name": "Sol", "userId": 7 }]));
    mock.expect(Method::Get, "/hotels").return_ok(json!([
        { "id": 1, "name": "Sol", "userId": 7 },
        { "id": 2, "name": "Other", "userId": 8 }
    ]));
    let hotel = HotelDraft {
        name: "Sol".into(),
        address: "Av. Sol 1".into(),
        user_id: Some(7),
        ..HotelDraft::default()
    };
    assert!(system.hotels.create_hotel(&hotel).await);
    system.hotels.fetch_hotels_by_user_id(7).await;
    assert_eq!(system.hotels.hotels().len(), 1);

    // Add a room to that hotel
    mock.expect(Method::Post, "/rooms").return_ok(json!({ "id": 11 }));
    mock.expect(Method::Get, "/rooms").return_ok(json!([{ "id": 11, "hotelId": 1, "type": "double" }]));
    let room = RoomDraft {
        room_type: "double".into(),
        price: 90.0,
        hotel_id: 1,
        ..RoomDraft::default()
    };
    assert!(system.rooms.create_room(&room).await);
    assert_eq!(system.rooms.rooms()[0].id, Some(11));

    // Book it and check the guest in
    mock.expect(Method::Post, "/bookings").return_ok(json!({ "id": 21 }));
    mock.expect(Method::Get, "/bookings").return_ok(json!([{ "id": 21, "userId": 7, "roomId": 11 }]));
    mock.expect(Method::Patch, "/bookings/21/check-in").return_ok(json!(null));
    mock.expect(Method::Get, "/bookings").return_ok(json!([{ "id": 21, "status": "checked-in" }]));
    let booking = ReservationDraft {
        user_id: 7,
        room_id: 11,
        hotel_id: 1,
        guest_name: "Guest".into(),
        ..ReservationDraft::default()
    };
    assert!(system.reservations.create_reservation(&booking).await);
    assert!(system.reservations.check_in(21).await);
    assert_eq!(system.reservations.reservations()[0].status, ReservationStatus::CheckedIn);

    // Every request after sign-in carried the token
    let requests = mock.requests();
    assert!(requests[1..].iter().all(|r| r.header("Authorization") == Some("Bearer T")));

    // Sign out
    system.auth.logout();
    assert!(!system.auth.is_authenticated());
    assert!(session.raw(TOKEN_KEY).is_none());
    assert!(session.raw(USER_KEY).is_none());

    assert!(system.hotels.errors().is_empty());
    assert!(system.rooms.errors().is_empty());
    assert!(system.reservations.errors().is_empty());
    mock.verify();
}
