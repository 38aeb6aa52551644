//! End-to-end tests of the assembled application over in-memory adapters.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::http::StatusCode;
use axum_test::TestServer;
use hotel_booking::BookingApiState;
use hotel_booking::auth::TokenVerifier;
use hotel_booking::mocks::MockBookingWorld;
use hotel_booking_core::RoomId;
use hotel_booking_server::build_app;
use hotel_booking_testing::{fixtures, test_clock};
use hotel_booking_web::{CORRELATION_ID_HEADER, ReadinessProbe};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

struct FlagProbe(AtomicBool);

impl ReadinessProbe for FlagProbe {
    async fn database_ready(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

fn app(world: &MockBookingWorld, verifier: &TokenVerifier, ready: bool) -> TestServer {
    let state = Arc::new(BookingApiState::new(
        world.engine(),
        world.sessions().clone(),
        verifier.clone(),
    ));
    let probe = Arc::new(FlagProbe(AtomicBool::new(ready)));
    TestServer::new(build_app(state, probe)).expect("test server")
}

#[tokio::test]
async fn test_health() {
    let world = MockBookingWorld::new();
    let server = app(&world, &TokenVerifier::new(b"secret"), false);

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_ready_reflects_database() {
    let world = MockBookingWorld::new();
    let verifier = TokenVerifier::new(b"secret");

    let down = app(&world, &verifier, false).get("/ready").await;
    down.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(down.json::<Value>()["database"], "unavailable");

    let up = app(&world, &verifier, true).get("/ready").await;
    up.assert_status_ok();
    assert_eq!(up.json::<Value>()["ready"], true);
}

#[tokio::test]
async fn test_every_response_has_correlation_id() {
    let world = MockBookingWorld::new();
    let server = app(&world, &TokenVerifier::new(b"secret"), true);

    for response in [server.get("/health").await, server.get("/booking").await] {
        let header = response.header(CORRELATION_ID_HEADER);
        assert_eq!(header.to_str().unwrap().len(), 36);
    }
}

#[tokio::test]
async fn test_book_then_move() {
    let world = MockBookingWorld::with_clock(Arc::new(test_clock()));
    let verifier = TokenVerifier::new(b"secret");
    let server = app(&world, &verifier, true);

    world.add_room(fixtures::room(1, 1)).unwrap();
    world.add_room(fixtures::room(2, 1)).unwrap();
    world.enroll(fixtures::USER, fixtures::paid_hotel_ticket()).unwrap();
    let token = verifier.issue(fixtures::USER, 1_700_000_000).unwrap();
    world.add_session(fixtures::USER, token.clone()).unwrap();

    let created = server
        .post("/booking")
        .authorization_bearer(&token)
        .json(&json!({ "roomId": 1 }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let booking_id = created.json::<Value>()["bookingId"].as_i64().unwrap();

    let moved = server
        .put(&format!("/booking/{booking_id}"))
        .authorization_bearer(&token)
        .json(&json!({ "roomId": 2 }))
        .await;
    moved.assert_status(StatusCode::CREATED);

    let current = server.get("/booking").authorization_bearer(&token).await;
    current.assert_status_ok();
    assert_eq!(current.json::<Value>()["Room"]["id"], 2);
    assert_eq!(world.room_count(RoomId::new(1)).unwrap(), 0);
    assert_eq!(world.room_count(RoomId::new(2)).unwrap(), 1);
}
