//! # Hotel Booking Core
//!
//! Domain types, errors and environment traits for the hotel booking service.
//!
//! This crate has no I/O of its own. It defines the vocabulary shared by the
//! booking engine, the storage adapters and the HTTP layer:
//!
//! - **Identifiers**: `UserId`, `RoomId`, `BookingId`, ...
//! - **Entities**: `Room`, `Booking`, `Enrollment`, `Ticket`
//! - **Eligibility**: `TicketEligibility`, the per-request snapshot of a
//!   user's enrollment and ticket state
//! - **Errors**: `BookingError`, the failure taxonomy of every booking operation
//! - **Environment**: `Clock`, abstracting time for deterministic tests
//!
//! ## Booking lifecycle
//!
//! ```text
//! NoBooking ──create──▶ Booked(room) ──replace──▶ Booked(new_room)
//! ```
//!
//! A user holds at most one booking, and a room never holds more bookings
//! than its capacity.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

pub use error::{BookingError, IneligibilityReason, Resource, Result};
pub use types::{
    Booking, BookingId, BookingWithRoom, Enrollment, EnrollmentId, HotelId, NewBooking,
    ReplaceBooking, Room, RoomId, Ticket, TicketEligibility, TicketId, TicketStatus, TicketType,
    UserId,
};

/// Environment traits for dependency injection.
///
/// External dependencies are abstracted behind traits and injected by the
/// caller, so tests can swap in deterministic implementations.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use hotel_booking_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let earlier = clock.now();
    /// assert!(clock.now() >= earlier);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
