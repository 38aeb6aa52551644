//! Health check endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

/// Dependency check behind the readiness endpoint.
///
/// Implemented by the server over its database pool and by tests over a
/// flag.
pub trait ReadinessProbe: Send + Sync {
    /// Returns `true` if the database answers a trivial query.
    fn database_ready(&self) -> impl Future<Output = bool> + Send;
}

/// Liveness response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`
    pub status: &'static str,
    /// Crate version of the running binary
    pub version: &'static str,
}

/// Readiness response body.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    /// All dependencies reachable
    pub ready: bool,
    /// `"ok"` or `"unavailable"`
    pub database: &'static str,
}

/// Simple health check endpoint (for basic liveness).
///
/// Does NOT check dependencies.
///
/// ```text
/// GET /health  ->  200 {"status":"ok","version":"0.1.0"}
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Readiness check (for load balancers).
///
/// # Status Codes
///
/// - 200 OK: database reachable
/// - 503 Service Unavailable: database unreachable
pub async fn readiness_check<P>(
    State(probe): State<Arc<P>>,
) -> (StatusCode, Json<ReadinessResponse>)
where
    P: ReadinessProbe + 'static,
{
    if probe.database_ready().await {
        (
            StatusCode::OK,
            Json(ReadinessResponse {
                ready: true,
                database: "ok",
            }),
        )
    } else {
        tracing::warn!("Readiness check failed: database unavailable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                ready: false,
                database: "unavailable",
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flag(bool);

    impl ReadinessProbe for Flag {
        async fn database_ready(&self) -> bool {
            self.0
        }
    }

    #[tokio::test]
    async fn test_simple_health_check() {
        let (status, Json(body)) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn test_ready_when_database_answers() {
        let (status, Json(body)) = readiness_check(State(Arc::new(Flag(true)))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.ready);
    }

    #[tokio::test]
    async fn test_unavailable_when_database_down() {
        let (status, Json(body)) = readiness_check(State(Arc::new(Flag(false)))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.database, "unavailable");
    }
}
