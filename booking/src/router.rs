//! Booking router composition.

use crate::auth::TokenVerifier;
use crate::engine::BookingEngine;
use crate::handlers::{create_booking, get_booking, replace_booking};
use crate::providers::{BookingStore, EnrollmentProvider, RoomCatalog, SessionStore};
use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

/// Shared state of the booking routes.
pub struct BookingApiState<E, R, B, S> {
    /// Booking engine.
    pub engine: BookingEngine<E, R, B>,

    /// Session lookup for bearer tokens.
    pub sessions: S,

    /// Token verifier.
    pub verifier: TokenVerifier,
}

impl<E, R, B, S> BookingApiState<E, R, B, S> {
    /// Create the state.
    #[must_use]
    pub const fn new(engine: BookingEngine<E, R, B>, sessions: S, verifier: TokenVerifier) -> Self {
        Self {
            engine,
            sessions,
            verifier,
        }
    }
}

/// Create the booking router.
///
/// # Routes
///
/// - `GET /booking` - Get the caller's booking
/// - `POST /booking` - Book a room
/// - `PUT /booking/:bookingId` - Move a booking to another room
///
/// # Example
///
/// ```rust,ignore
/// let state = Arc::new(BookingApiState::new(engine, sessions, verifier));
///
/// let app = Router::new()
///     .merge(booking_router(state))
///     .layer(TraceLayer::new_for_http());
/// ```
pub fn booking_router<E, R, B, S>(state: Arc<BookingApiState<E, R, B, S>>) -> Router
where
    E: EnrollmentProvider + 'static,
    R: RoomCatalog + 'static,
    B: BookingStore + 'static,
    S: SessionStore + 'static,
{
    Router::new()
        .route(
            "/booking",
            get(get_booking::<E, R, B, S>).post(create_booking::<E, R, B, S>),
        )
        .route("/booking/:bookingId", put(replace_booking::<E, R, B, S>))
        .with_state(state)
}
