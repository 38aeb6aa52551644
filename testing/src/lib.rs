//! # Hotel Booking Testing
//!
//! Testing utilities and fixtures for the hotel booking service.
//!
//! This crate provides:
//! - Deterministic implementations of environment traits
//! - Fixture builders for rooms, enrollments and tickets
//! - Property-based testing strategies for ticket state
//! - A tracing subscriber for test output
//!
//! ## Example
//!
//! ```ignore
//! use hotel_booking_testing::fixtures;
//! use hotel_booking::mocks::MockBookingWorld;
//!
//! #[tokio::test]
//! async fn test_create_booking() {
//!     let world = MockBookingWorld::new();
//!     world.add_room(fixtures::room(1, 2)).unwrap();
//!     world.enroll(fixtures::USER, fixtures::paid_hotel_ticket()).unwrap();
//!
//!     let booking = world.engine().create_booking(fixtures::USER, RoomId::new(1)).await?;
//!     assert_eq!(booking.room_id, RoomId::new(1));
//! }
//! ```

use chrono::{DateTime, Utc};
use hotel_booking_core::environment::Clock;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use hotel_booking_testing::mocks::FixedClock;
    /// use hotel_booking_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(super::fixtures::timestamp())
    }
}

/// Fixture builders for domain values.
///
/// Ids are chosen by the caller; the builders fill the rest with stable
/// values so assertions can compare whole structs.
pub mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};
    use hotel_booking_core::{
        Enrollment, EnrollmentId, HotelId, Room, RoomId, Ticket, TicketId, TicketStatus,
        TicketType, UserId,
    };

    /// Default user for single-user scenarios.
    pub const USER: UserId = UserId::new(1);

    /// Second user, for capacity scenarios.
    pub const OTHER_USER: UserId = UserId::new(2);

    /// Default hotel all fixture rooms belong to.
    pub const HOTEL: HotelId = HotelId::new(1);

    /// Timestamp used by every fixture (2025-01-01 00:00:00 UTC).
    #[must_use]
    pub fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// A room with the given id and capacity.
    #[must_use]
    pub fn room(id: i32, capacity: i32) -> Room {
        Room {
            id: RoomId::new(id),
            name: format!("Room {id}"),
            capacity,
            hotel_id: HOTEL,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    /// Enrollment of `user_id`, sharing its numeric id with the user.
    #[must_use]
    pub const fn enrollment(user_id: UserId) -> Enrollment {
        Enrollment {
            id: EnrollmentId::new(user_id.get()),
            user_id,
        }
    }

    /// A ticket with explicit status and type flags.
    #[must_use]
    pub const fn ticket(status: TicketStatus, is_remote: bool, includes_hotel: bool) -> Ticket {
        Ticket {
            id: TicketId::new(1),
            enrollment_id: EnrollmentId::new(1),
            status,
            ticket_type: TicketType {
                is_remote,
                includes_hotel,
            },
        }
    }

    /// Paid, in-person ticket with accommodation: the only bookable kind.
    #[must_use]
    pub const fn paid_hotel_ticket() -> Ticket {
        ticket(TicketStatus::Paid, false, true)
    }

    /// Paid remote ticket.
    #[must_use]
    pub const fn remote_ticket() -> Ticket {
        ticket(TicketStatus::Paid, true, false)
    }

    /// Reserved (unpaid) ticket with accommodation.
    #[must_use]
    pub const fn unpaid_hotel_ticket() -> Ticket {
        ticket(TicketStatus::Reserved, false, true)
    }

    /// Paid in-person ticket without accommodation.
    #[must_use]
    pub const fn paid_ticket_without_hotel() -> Ticket {
        ticket(TicketStatus::Paid, false, false)
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use hotel_booking_core::{Ticket, TicketStatus};
    use proptest::prelude::*;

    /// Any ticket status.
    pub fn ticket_status() -> impl Strategy<Value = TicketStatus> {
        prop_oneof![Just(TicketStatus::Paid), Just(TicketStatus::Reserved)]
    }

    /// Tickets that do not entitle their holder to a room.
    pub fn ineligible_ticket() -> impl Strategy<Value = Ticket> {
        (ticket_status(), any::<bool>(), any::<bool>())
            .prop_filter("ticket must be ineligible", |(status, remote, hotel)| {
                *status != TicketStatus::Paid || *remote || !*hotel
            })
            .prop_map(|(status, remote, hotel)| super::fixtures::ticket(status, remote, hotel))
    }
}

/// Install a fmt subscriber for test output.
///
/// Honors `RUST_LOG`; safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotel_booking=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_booking_core::TicketEligibility;
    use proptest::prelude::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
        assert_eq!(time1, fixtures::timestamp());
    }

    #[test]
    fn test_paid_hotel_ticket_is_eligible() {
        let enrollment = fixtures::enrollment(fixtures::USER);
        let ticket = fixtures::paid_hotel_ticket();
        assert!(TicketEligibility::from_records(Some(&enrollment), Some(&ticket)).is_eligible());
    }

    proptest! {
        #[test]
        fn prop_ineligible_tickets_are_rejected(ticket in properties::ineligible_ticket()) {
            let enrollment = fixtures::enrollment(fixtures::USER);
            prop_assert!(!TicketEligibility::from_records(Some(&enrollment), Some(&ticket)).is_eligible());
        }
    }
}
