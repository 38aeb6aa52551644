//! # Hotel Booking
//!
//! Booking eligibility engine for event hotel rooms, with the storage
//! adapters and HTTP surface around it.
//!
//! A user holding a paid, in-person ticket that includes accommodation may
//! reserve exactly one room, move that reservation to another room, or read
//! it back. Rooms never hold more bookings than their capacity.
//!
//! ## Architecture
//!
//! ```text
//! HTTP handler ──▶ BookingEngine ──▶ EnrollmentProvider  (enrollment, ticket)
//!                        │       ──▶ RoomCatalog         (room, capacity)
//!                        └──────▶ BookingStore         (guarded writes)
//! ```
//!
//! The engine runs its checks fail-fast, in a fixed order, against the
//! providers. Stores re-check capacity and the one-booking-per-user rule
//! atomically with each write, so concurrent requests cannot overbook a
//! room or give a user two bookings.
//!
//! ## Features
//!
//! - `test-utils` (default): in-memory providers in [`mocks`]
//! - `axum` (default): handlers, router and bearer-token authentication
//! - `postgres`: `sqlx` adapters in [`stores::postgres`] and the migrations
//!
//! ## Example
//!
//! ```rust,ignore
//! use hotel_booking::{BookingEngine, mocks::MockBookingWorld};
//!
//! let world = MockBookingWorld::new();
//! world.add_room(fixtures::room(1, 2)).unwrap();
//! world.enroll(fixtures::USER, fixtures::paid_hotel_ticket()).unwrap();
//!
//! let booking = world.engine().create_booking(fixtures::USER, RoomId::new(1)).await?;
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

pub mod engine;
pub mod metrics;
pub mod providers;
pub mod stores;

#[cfg(feature = "test-utils")]
pub mod mocks;

#[cfg(feature = "axum")]
pub mod auth;
#[cfg(feature = "axum")]
pub mod handlers;
#[cfg(feature = "axum")]
pub mod router;

pub use engine::BookingEngine;
pub use hotel_booking_core::{BookingError, Result};
pub use providers::{BookingStore, EnrollmentProvider, RoomCatalog, Session, SessionStore};

#[cfg(feature = "axum")]
pub use router::{BookingApiState, booking_router};
