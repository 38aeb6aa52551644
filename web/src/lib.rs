//! Axum integration shared by the hotel booking HTTP surface.
//!
//! This crate holds the HTTP plumbing that is independent of the booking
//! domain:
//!
//! - `AppError`: status + code + message, rendered as a JSON body
//! - Correlation ids: middleware layer and extractor
//! - Health and readiness handlers
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at the router
//! 2. **Correlation id** is read from `X-Correlation-ID` or generated
//! 3. **Handler** extracts identity and payload, calls the booking engine
//! 4. **Map result** to an HTTP response (`AppError` on failure)
//!
//! # Example
//!
//! ```ignore
//! use hotel_booking_web::{AppError, correlation_id_layer};
//! use axum::{Router, routing::get, Json};
//!
//! async fn handler() -> Result<Json<Data>, AppError> {
//!     Err(AppError::not_found("Room not found"))
//! }
//!
//! let app = Router::new()
//!     .route("/rooms/:id", get(handler))
//!     .layer(correlation_id_layer());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::CorrelationId;
pub use handlers::health::{ReadinessProbe, health_check, readiness_check};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
