//! In-memory wiring of all mock providers.

use super::{MockBookingStore, MockEnrollmentProvider, MockRoomCatalog, MockSessionStore};
use crate::engine::BookingEngine;
use hotel_booking_core::environment::Clock;
use crate::providers::Session;
use hotel_booking_core::{
    Booking, Enrollment, EnrollmentId, Result, Room, RoomId, Ticket, UserId,
};
use std::sync::Arc;

/// Engine over the mock providers.
pub type MockBookingEngine =
    BookingEngine<MockEnrollmentProvider, MockRoomCatalog, MockBookingStore>;

/// A set of mock providers sharing one in-memory dataset.
///
/// The seeding and inspection helpers return `BookingError::Storage` if a
/// mock's lock is poisoned.
#[derive(Debug, Clone)]
pub struct MockBookingWorld {
    enrollments: MockEnrollmentProvider,
    rooms: MockRoomCatalog,
    bookings: MockBookingStore,
    sessions: MockSessionStore,
}

impl Default for MockBookingWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBookingWorld {
    /// Create an empty world stamped by the system clock.
    #[must_use]
    pub fn new() -> Self {
        let rooms = MockRoomCatalog::new();
        Self {
            enrollments: MockEnrollmentProvider::new(),
            bookings: MockBookingStore::new(rooms.clone()),
            rooms,
            sessions: MockSessionStore::new(),
        }
    }

    /// Create an empty world stamping bookings with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let rooms = MockRoomCatalog::new();
        Self {
            enrollments: MockEnrollmentProvider::new(),
            bookings: MockBookingStore::with_clock(rooms.clone(), clock),
            rooms,
            sessions: MockSessionStore::new(),
        }
    }

    /// An engine over this world's providers.
    #[must_use]
    pub fn engine(&self) -> MockBookingEngine {
        BookingEngine::new(
            self.enrollments.clone(),
            self.rooms.clone(),
            self.bookings.clone(),
        )
    }

    /// The booking store.
    #[must_use]
    pub const fn bookings(&self) -> &MockBookingStore {
        &self.bookings
    }

    /// The session store.
    #[must_use]
    pub const fn sessions(&self) -> &MockSessionStore {
        &self.sessions
    }

    /// Add a room.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the catalog's lock is poisoned.
    pub fn add_room(&self, room: Room) -> Result<()> {
        self.rooms.insert(room)
    }

    /// Enroll `user_id` holding `ticket`.
    ///
    /// The enrollment shares its numeric id with the user; the ticket is
    /// attached to it whatever its `enrollment_id` said.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the provider's lock is poisoned.
    pub fn enroll(&self, user_id: UserId, ticket: Ticket) -> Result<Enrollment> {
        let enrollment = self.enroll_without_ticket(user_id)?;
        self.enrollments.insert_ticket(Ticket {
            enrollment_id: enrollment.id,
            ..ticket
        })?;
        Ok(enrollment)
    }

    /// Enroll `user_id` without a ticket.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the provider's lock is poisoned.
    pub fn enroll_without_ticket(&self, user_id: UserId) -> Result<Enrollment> {
        let enrollment = Enrollment {
            id: EnrollmentId::new(user_id.get()),
            user_id,
        };
        self.enrollments.insert_enrollment(enrollment)?;
        Ok(enrollment)
    }

    /// Insert a booking without checks.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the store's lock is poisoned.
    pub fn seed_booking(&self, user_id: UserId, room_id: RoomId) -> Result<Booking> {
        self.bookings.seed(user_id, room_id)
    }

    /// Open a session for `user_id` under `token`.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the session store's lock is poisoned.
    pub fn add_session(&self, user_id: UserId, token: impl Into<String>) -> Result<Session> {
        self.sessions.insert(user_id, token)
    }

    /// Number of bookings in `room_id`.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the store's lock is poisoned.
    pub fn room_count(&self, room_id: RoomId) -> Result<usize> {
        let all = self.bookings.all()?;
        Ok(all.iter().filter(|b| b.room_id == room_id).count())
    }

    /// The booking held by `user_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the store's lock is poisoned.
    pub fn user_booking(&self, user_id: UserId) -> Result<Option<Booking>> {
        let all = self.bookings.all()?;
        Ok(all.into_iter().find(|b| b.user_id == user_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hotel_booking_testing::fixtures::{self, USER};

    #[test]
    fn test_seeding_helpers_return_what_they_stored() {
        let world = MockBookingWorld::new();
        world.add_room(fixtures::room(1, 2)).unwrap();

        let enrollment = world.enroll(USER, fixtures::paid_hotel_ticket()).unwrap();
        assert_eq!(enrollment.user_id, USER);

        let session = world.add_session(USER, "token-1").unwrap();
        assert_eq!(session.user_id, USER);
        assert_eq!(session.token, "token-1");

        let booking = world.seed_booking(USER, RoomId::new(1)).unwrap();
        assert_eq!(world.user_booking(USER).unwrap(), Some(booking));
        assert_eq!(world.room_count(RoomId::new(1)).unwrap(), 1);
        assert_eq!(world.room_count(RoomId::new(2)).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_enroll_attaches_ticket_to_enrollment() {
        let world = MockBookingWorld::new();
        world.enroll(USER, fixtures::paid_hotel_ticket()).unwrap();
        world.enroll_without_ticket(fixtures::OTHER_USER).unwrap();

        let engine = world.engine();
        assert!(engine.assert_bookable(USER).await.is_ok());
        assert!(engine.assert_bookable(fixtures::OTHER_USER).await.is_err());
    }
}
