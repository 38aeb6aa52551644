//! Application router.
//!
//! Merges the booking routes with the health endpoints and wraps them in
//! request tracing and correlation-id layers.

use axum::{Router, routing::get};
use hotel_booking::auth::TokenVerifier;
use hotel_booking::stores::postgres::{
    PostgresBookingStore, PostgresEnrollmentProvider, PostgresRoomCatalog, PostgresSessionStore,
};
use hotel_booking::{
    BookingApiState, BookingEngine, BookingStore, EnrollmentProvider, RoomCatalog, SessionStore,
    booking_router,
};
use hotel_booking_web::{ReadinessProbe, correlation_id_layer, health_check, readiness_check};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Booking state backed by `PostgreSQL`.
pub type PostgresApiState = BookingApiState<
    PostgresEnrollmentProvider,
    PostgresRoomCatalog,
    PostgresBookingStore,
    PostgresSessionStore,
>;

/// Readiness probe that pings the pool.
#[derive(Debug, Clone)]
pub struct PgReadiness {
    pool: PgPool,
}

impl PgReadiness {
    /// Create a probe over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ReadinessProbe for PgReadiness {
    async fn database_ready(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Readiness check failed");
                false
            }
        }
    }
}

/// Assemble the production state: one adapter per provider over `pool`.
#[must_use]
pub fn postgres_state(pool: &PgPool, verifier: TokenVerifier) -> Arc<PostgresApiState> {
    let engine = BookingEngine::new(
        PostgresEnrollmentProvider::new(pool.clone()),
        PostgresRoomCatalog::new(pool.clone()),
        PostgresBookingStore::new(pool.clone()),
    );

    Arc::new(BookingApiState::new(
        engine,
        PostgresSessionStore::new(pool.clone()),
        verifier,
    ))
}

/// Build the application router.
///
/// # Routes
///
/// - `GET /health` - Liveness
/// - `GET /ready` - Readiness (database reachable)
/// - `GET|POST /booking`, `PUT /booking/:bookingId` - Booking API
pub fn build_app<E, R, B, S, P>(state: Arc<BookingApiState<E, R, B, S>>, probe: Arc<P>) -> Router
where
    E: EnrollmentProvider + 'static,
    R: RoomCatalog + 'static,
    B: BookingStore + 'static,
    S: SessionStore + 'static,
    P: ReadinessProbe + 'static,
{
    let health = Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check::<P>))
        .with_state(probe);

    Router::new()
        .merge(health)
        .merge(booking_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
}
