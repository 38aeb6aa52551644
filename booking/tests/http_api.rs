//! HTTP contract tests for the booking routes.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::http::StatusCode;
use axum_test::TestServer;
use hotel_booking::auth::TokenVerifier;
use hotel_booking::mocks::{
    MockBookingStore, MockBookingWorld, MockEnrollmentProvider, MockRoomCatalog,
    MockSessionStore,
};
use hotel_booking::{BookingApiState, booking_router};
use hotel_booking_core::{RoomId, UserId};
use hotel_booking_testing::{fixtures, test_clock};
use hotel_booking_web::{CORRELATION_ID_HEADER, correlation_id_layer};
use serde_json::{Value, json};
use std::sync::Arc;

const SECRET: &[u8] = b"http-test-secret";
const ROOM_A: RoomId = RoomId::new(1);
const ROOM_B: RoomId = RoomId::new(2);

type MockState =
    BookingApiState<MockEnrollmentProvider, MockRoomCatalog, MockBookingStore, MockSessionStore>;

struct Harness {
    server: TestServer,
    world: MockBookingWorld,
    verifier: TokenVerifier,
}

impl Harness {
    fn new() -> Self {
        let world = MockBookingWorld::with_clock(Arc::new(test_clock()));
        let verifier = TokenVerifier::new(SECRET);
        let state: Arc<MockState> = Arc::new(BookingApiState::new(
            world.engine(),
            world.sessions().clone(),
            verifier.clone(),
        ));
        let app = booking_router(state).layer(correlation_id_layer());

        Self {
            server: TestServer::new(app).expect("test server"),
            world,
            verifier,
        }
    }

    /// Sign a token for `user_id` and open a session for it.
    fn login(&self, user_id: UserId) -> String {
        let token = self.verifier.issue(user_id, 1_700_000_000).unwrap();
        self.world.add_session(user_id, token.clone()).unwrap();
        token
    }

    /// An enrolled user with a bookable ticket, logged in.
    fn eligible_user(&self, user_id: UserId) -> String {
        self.world.enroll(user_id, fixtures::paid_hotel_ticket()).unwrap();
        self.login(user_id)
    }
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_missing_token_is_401() {
    let h = Harness::new();

    h.server.get("/booking").await.assert_status(StatusCode::UNAUTHORIZED);
    h.server
        .post("/booking")
        .json(&json!({ "roomId": 1 }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    h.server
        .put("/booking/1")
        .json(&json!({ "roomId": 1 }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_is_401() {
    let h = Harness::new();

    let response = h
        .server
        .get("/booking")
        .authorization_bearer("not-a-jwt")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_token_without_session_is_401() {
    let h = Harness::new();
    h.world.enroll(fixtures::USER, fixtures::paid_hotel_ticket()).unwrap();
    let token = h.verifier.issue(fixtures::USER, 0).unwrap();

    h.server
        .get("/booking")
        .authorization_bearer(token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// GET /booking
// ============================================================================

#[tokio::test]
async fn test_get_with_remote_ticket_is_402() {
    let h = Harness::new();
    h.world.enroll(fixtures::USER, fixtures::remote_ticket()).unwrap();
    let token = h.login(fixtures::USER);

    h.server
        .get("/booking")
        .authorization_bearer(token)
        .await
        .assert_status(StatusCode::PAYMENT_REQUIRED);
}

#[tokio::test]
async fn test_get_storage_failure_is_402() {
    let h = Harness::new();
    let token = h.eligible_user(fixtures::USER);
    h.world.bookings().set_unavailable(true);

    h.server
        .get("/booking")
        .authorization_bearer(token)
        .await
        .assert_status(StatusCode::PAYMENT_REQUIRED);
}

#[tokio::test]
async fn test_get_without_enrollment_is_404() {
    let h = Harness::new();
    let token = h.login(fixtures::USER);

    h.server
        .get("/booking")
        .authorization_bearer(token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_returns_booking_with_room() {
    let h = Harness::new();
    h.world.add_room(fixtures::room(ROOM_A.get(), 3)).unwrap();
    let token = h.eligible_user(fixtures::USER);
    let booking = h.world.seed_booking(fixtures::USER, ROOM_A).unwrap();

    let response = h.server.get("/booking").authorization_bearer(token).await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "id": booking.id.get(),
        "Room": {
            "id": 1,
            "name": "Room 1",
            "capacity": 3,
            "hotelId": fixtures::HOTEL.get(),
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }
    }));
}

// ============================================================================
// POST /booking
// ============================================================================

#[tokio::test]
async fn test_post_for_missing_room_is_404() {
    let h = Harness::new();
    let token = h.eligible_user(fixtures::USER);

    h.server
        .post("/booking")
        .authorization_bearer(token)
        .json(&json!({ "roomId": 99 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_when_already_booked_is_403() {
    let h = Harness::new();
    h.world.add_room(fixtures::room(ROOM_A.get(), 2)).unwrap();
    h.world.add_room(fixtures::room(ROOM_B.get(), 2)).unwrap();
    let token = h.eligible_user(fixtures::USER);
    h.world.seed_booking(fixtures::USER, ROOM_A).unwrap();

    h.server
        .post("/booking")
        .authorization_bearer(token)
        .json(&json!({ "roomId": ROOM_B.get() }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_post_into_full_room_is_403() {
    let h = Harness::new();
    h.world.add_room(fixtures::room(ROOM_A.get(), 1)).unwrap();
    h.world.seed_booking(fixtures::OTHER_USER, ROOM_A).unwrap();
    let token = h.eligible_user(fixtures::USER);

    let response = h
        .server
        .post("/booking")
        .authorization_bearer(token)
        .json(&json!({ "roomId": ROOM_A.get() }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_post_with_unpaid_ticket_is_403() {
    let h = Harness::new();
    h.world.add_room(fixtures::room(ROOM_A.get(), 1)).unwrap();
    h.world.enroll(fixtures::USER, fixtures::unpaid_hotel_ticket()).unwrap();
    let token = h.login(fixtures::USER);

    h.server
        .post("/booking")
        .authorization_bearer(token)
        .json(&json!({ "roomId": ROOM_A.get() }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_post_creates_booking() {
    let h = Harness::new();
    h.world.add_room(fixtures::room(ROOM_A.get(), 1)).unwrap();
    let token = h.eligible_user(fixtures::USER);

    let response = h
        .server
        .post("/booking")
        .authorization_bearer(token)
        .json(&json!({ "roomId": ROOM_A.get() }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let stored = h.world.user_booking(fixtures::USER).unwrap().expect("booking stored");
    response.assert_json(&json!({ "bookingId": stored.id.get() }));
    assert_eq!(h.world.room_count(ROOM_A).unwrap(), 1);
}

#[tokio::test]
async fn test_post_with_malformed_body_is_400() {
    let h = Harness::new();
    h.world.add_room(fixtures::room(ROOM_A.get(), 1)).unwrap();
    let token = h.eligible_user(fixtures::USER);

    h.server
        .post("/booking")
        .authorization_bearer(token.clone())
        .json(&json!({ "roomId": "one" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    h.server
        .post("/booking")
        .authorization_bearer(token)
        .json(&json!({}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(h.world.room_count(ROOM_A).unwrap(), 0);
}

#[tokio::test]
async fn test_post_storage_failure_is_400() {
    let h = Harness::new();
    h.world.add_room(fixtures::room(ROOM_A.get(), 1)).unwrap();
    let token = h.eligible_user(fixtures::USER);
    h.world.bookings().set_unavailable(true);

    h.server
        .post("/booking")
        .authorization_bearer(token)
        .json(&json!({ "roomId": ROOM_A.get() }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// PUT /booking/:bookingId
// ============================================================================

#[tokio::test]
async fn test_put_for_missing_room_is_404() {
    let h = Harness::new();
    h.world.add_room(fixtures::room(ROOM_A.get(), 1)).unwrap();
    let token = h.eligible_user(fixtures::USER);
    let booking = h.world.seed_booking(fixtures::USER, ROOM_A).unwrap();

    h.server
        .put(&format!("/booking/{}", booking.id))
        .authorization_bearer(token)
        .json(&json!({ "roomId": 99 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_into_full_room_is_403() {
    let h = Harness::new();
    h.world.add_room(fixtures::room(ROOM_A.get(), 1)).unwrap();
    h.world.add_room(fixtures::room(ROOM_B.get(), 1)).unwrap();
    let token = h.eligible_user(fixtures::USER);
    let booking = h.world.seed_booking(fixtures::USER, ROOM_A).unwrap();
    h.world.seed_booking(fixtures::OTHER_USER, ROOM_B).unwrap();

    h.server
        .put(&format!("/booking/{}", booking.id))
        .authorization_bearer(token)
        .json(&json!({ "roomId": ROOM_B.get() }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_put_with_foreign_booking_id_is_403() {
    let h = Harness::new();
    h.world.add_room(fixtures::room(ROOM_A.get(), 2)).unwrap();
    h.world.add_room(fixtures::room(ROOM_B.get(), 2)).unwrap();
    let token = h.eligible_user(fixtures::USER);
    h.world.seed_booking(fixtures::USER, ROOM_A).unwrap();
    let theirs = h.world.seed_booking(fixtures::OTHER_USER, ROOM_A).unwrap();

    h.server
        .put(&format!("/booking/{}", theirs.id))
        .authorization_bearer(token)
        .json(&json!({ "roomId": ROOM_B.get() }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    assert_eq!(h.world.room_count(ROOM_B).unwrap(), 0);
}

#[tokio::test]
async fn test_put_with_non_numeric_id_is_400() {
    let h = Harness::new();
    h.world.add_room(fixtures::room(ROOM_A.get(), 2)).unwrap();
    let token = h.eligible_user(fixtures::USER);

    h.server
        .put("/booking/abc")
        .authorization_bearer(token)
        .json(&json!({ "roomId": ROOM_A.get() }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_replaces_booking() {
    let h = Harness::new();
    h.world.add_room(fixtures::room(ROOM_A.get(), 2)).unwrap();
    h.world.add_room(fixtures::room(ROOM_B.get(), 1)).unwrap();
    let token = h.eligible_user(fixtures::USER);
    let old = h.world.seed_booking(fixtures::USER, ROOM_A).unwrap();

    let response = h
        .server
        .put(&format!("/booking/{}", old.id))
        .authorization_bearer(token)
        .json(&json!({ "roomId": ROOM_B.get() }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let new = h.world.user_booking(fixtures::USER).unwrap().expect("booking stored");
    assert_ne!(new.id, old.id);
    assert_eq!(new.room_id, ROOM_B);
    response.assert_json(&json!({ "bookingId": new.id.get() }));
    assert_eq!(h.world.room_count(ROOM_A).unwrap(), 0);
}

// ============================================================================
// Plumbing
// ============================================================================

#[tokio::test]
async fn test_responses_carry_correlation_id() {
    let h = Harness::new();

    let response = h.server.get("/booking").await;

    let header = response.header(CORRELATION_ID_HEADER);
    assert!(uuid_like(header.to_str().unwrap()));
}

fn uuid_like(value: &str) -> bool {
    value.len() == 36 && value.chars().filter(|c| *c == '-').count() == 4
}
