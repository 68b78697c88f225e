use hostel_client::framework::mock::{create_mock_transport, expect_request, MockTransport};
use hostel_client::framework::{ApiError, EntityStore, HttpClient, MemorySession, Method, TOKEN_KEY, USER_KEY};
use hostel_client::lifecycle::{ApiPaths, ClientConfig};
use hostel_client::auth_store::AuthStore;
use hostel_client::model::{Credentials, HotelDraft};
use serde_json::json;
use std::sync::Arc;

fn http(mock: &MockTransport) -> HttpClient {
    HttpClient::new(mock.transport(), Arc::new(MemorySession::new()))
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_hotels() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "/hotels").return_ok(json!([{ "id": 1 }, { "id": 2 }]));
    mock.expect(Method::Get, "/hotels").return_err(ApiError::Transport("connection reset".into()));

    let hotels = hostel_client::hotel_store::new(http(&mock), &ClientConfig::default());
    hotels.fetch_hotels().await;
    let before = hotels.hotels();

    hotels.fetch_hotels().await;

    assert_eq!(hotels.hotels(), before);
    assert_eq!(hotels.errors(), vec![ApiError::Transport("connection reset".into())]);
    assert!(!hotels.loading());
}

#[tokio::test]
async fn test_created_hotel_appears_after_refresh() {
    let mock = MockTransport::new();
    mock.expect(Method::Post, "/hotels").return_ok(json!({ "id": 42, "name": "Nuevo" }));
    mock.expect(Method::Get, "/hotels").return_ok(json!({ "data": [{ "id": 41 }, { "id": 42, "name": "Nuevo" }] }));

    let hotels = hostel_client::hotel_store::new(http(&mock), &ClientConfig::default());
    let draft = HotelDraft {
        name: "Nuevo".into(),
        ..HotelDraft::default()
    };

    assert!(hotels.create_hotel(&draft).await);
    assert!(hotels.hotels().iter().any(|h| h.id == Some(42)));
}

#[tokio::test]
async fn test_rooms_by_hotel_accepts_string_id() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "/rooms").return_ok(json!([
        { "id": 1, "hotelId": 3 },
        { "id": 2, "hotelId": 30 },
        { "id": 3, "hotelId": 3 }
    ]));

    let rooms = hostel_client::room_store::new(http(&mock), &ClientConfig::default());
    rooms.fetch_rooms_by_hotel_id("3").await;

    let hotel_ids: Vec<_> = rooms.rooms().iter().map(|r| r.hotel_id).collect();
    assert_eq!(hotel_ids, vec![Some(3), Some(3)]);
}

#[tokio::test]
async fn test_check_in_patches_then_reloads_with_loading_cleared() {
    let (transport, mut requests) = create_mock_transport(4);
    let http = HttpClient::new(transport, Arc::new(MemorySession::new()));
    let reservations = hostel_client::reservation_store::new(http, &ClientConfig::default());

    let task = tokio::spawn({
        let reservations = reservations.clone();
        async move { reservations.check_in(5).await }
    });

    let patch = expect_request(&mut requests).await.expect("Expected PATCH");
    assert_eq!(patch.request.method, Method::Patch);
    assert_eq!(patch.request.path, "/bookings/5/check-in");
    assert!(reservations.loading());
    patch.respond_ok(json!(null));

    let reload = expect_request(&mut requests).await.expect("Expected GET");
    assert_eq!(reload.request.method, Method::Get);
    assert_eq!(reload.request.path, "/bookings");
    assert!(reservations.loading());
    reload.respond_ok(json!([{ "id": 5, "status": "checked-in" }]));

    assert!(task.await.unwrap());
    assert!(!reservations.loading());
    assert_eq!(reservations.reservations().len(), 1);
}

#[tokio::test]
async fn test_login_then_logout_round_trip() {
    let mock = MockTransport::new();
    mock.expect(Method::Post, "/authentication/sign-in")
        .return_ok(json!({ "token": "T", "id": 1, "username": "a" }));
    let session = MemorySession::new();
    let http = HttpClient::new(mock.transport(), Arc::new(session.clone()));
    let auth = AuthStore::new(http, &ApiPaths::default());

    assert!(auth.login(&Credentials::new("a", "p")).await);
    assert_eq!(auth.token().as_deref(), Some("T"));
    let user = auth.current_user().unwrap();
    assert_eq!(user.roles, "Client");
    assert_eq!(user.names, "a");
    assert_eq!(session.raw(TOKEN_KEY).as_deref(), Some("T"));
    assert!(session.raw(USER_KEY).is_some());

    auth.logout();
    assert!(auth.token().is_none());
    assert!(auth.current_user().is_none());
    assert!(session.raw(TOKEN_KEY).is_none());
    assert!(session.raw(USER_KEY).is_none());
}

#[tokio::test]
async fn test_login_reads_token_from_data_envelope() {
    let mock = MockTransport::new();
    mock.expect(Method::Post, "/authentication/sign-in")
        .return_ok(json!({ "data": { "token": "T", "id": 1, "username": "a" } }));
    let session = MemorySession::new();
    let http = HttpClient::new(mock.transport(), Arc::new(session.clone()));
    let auth = AuthStore::new(http, &ApiPaths::default());

    assert!(auth.login(&Credentials::new("a", "p")).await);

    assert!(auth.is_authenticated());
    assert_eq!(auth.token().as_deref(), Some("T"));
    assert_eq!(auth.current_user().unwrap().roles, "Client");
    assert_eq!(session.raw(TOKEN_KEY).as_deref(), Some("T"));
    assert!(session.raw(USER_KEY).unwrap().contains("\"username\":\"a\""));
    mock.verify();
}

#[tokio::test]
async fn test_logout_while_signing_in_persists_nothing() {
    let (transport, mut requests) = create_mock_transport(1);
    let session = MemorySession::new();
    let http = HttpClient::new(transport, Arc::new(session.clone()));
    let auth = AuthStore::new(http, &ApiPaths::default());

    let task = tokio::spawn({
        let auth = auth.clone();
        async move { auth.login(&Credentials::new("a", "p")).await }
    });

    let pending = expect_request(&mut requests).await.expect("Expected sign-in");
    auth.logout();
    pending.respond_ok(json!({ "token": "T", "id": 1, "username": "a" }));

    assert!(!task.await.unwrap());
    assert!(session.raw(TOKEN_KEY).is_none());
    assert!(!auth.is_authenticated());
    assert!(!auth.loading());
}
