//! # Hotel Booking Server
//!
//! Wiring for the `hotel-booking-server` binary: configuration, the
//! application router, and the Prometheus exporter.
//!
//! ```text
//! GET  /health              liveness
//! GET  /ready               database reachable?
//! GET  /booking             caller's booking
//! POST /booking             book a room
//! PUT  /booking/:bookingId  move a booking
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]

pub mod app;
pub mod config;
pub mod metrics;

pub use app::{PgReadiness, build_app, postgres_state};
pub use config::Config;
