//! Domain types for the hotel booking service.
//!
//! Identifiers are 32-bit integers assigned by the relational store. Entities
//! serialize with camel-case field names, matching the HTTP contract.

use crate::error::{BookingError, IneligibilityReason, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[doc = concat!("Create a `", stringify!($name), "` from its raw value")]
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the raw value
            #[must_use]
            pub const fn get(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// Identifier of a user
    UserId
);
define_id!(
    /// Identifier of a hotel room
    RoomId
);
define_id!(
    /// Identifier of a booking
    BookingId
);
define_id!(
    /// Identifier of a hotel
    HotelId
);
define_id!(
    /// Identifier of an event enrollment
    EnrollmentId
);
define_id!(
    /// Identifier of a ticket
    TicketId
);

// ============================================================================
// Catalog
// ============================================================================

/// A bookable room within a hotel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Room id
    pub id: RoomId,
    /// Display name
    pub name: String,
    /// Maximum number of bookings the room accepts
    pub capacity: i32,
    /// Owning hotel
    pub hotel_id: HotelId,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Returns `true` if `occupied` bookings leave no spare capacity.
    ///
    /// Counts above capacity also report full. A non-positive capacity is
    /// always full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hotel_booking_core::{Room, RoomId, HotelId};
    /// # use chrono::Utc;
    /// let room = Room {
    ///     id: RoomId::new(1),
    ///     name: "101".into(),
    ///     capacity: 2,
    ///     hotel_id: HotelId::new(1),
    ///     created_at: Utc::now(),
    ///     updated_at: Utc::now(),
    /// };
    /// assert!(!room.is_full(1));
    /// assert!(room.is_full(2));
    /// assert!(room.is_full(3));
    /// ```
    #[must_use]
    pub fn is_full(&self, occupied: usize) -> bool {
        usize::try_from(self.capacity).map_or(true, |capacity| occupied >= capacity)
    }
}

// ============================================================================
// Bookings
// ============================================================================

/// One user's claim on one room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking id
    pub id: BookingId,
    /// Holder
    pub user_id: UserId,
    /// Booked room
    pub room_id: RoomId,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A booking together with its room, as returned to the holder.
///
/// Serializes as `{ "id": .., "Room": { .. } }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWithRoom {
    /// Booking id
    pub id: BookingId,
    /// Booked room
    #[serde(rename = "Room")]
    pub room: Room,
}

/// Insert command for a booking.
///
/// Stores re-check the room's capacity and the holder's existing booking
/// atomically with the insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewBooking {
    /// Holder
    pub user_id: UserId,
    /// Room to book
    pub room_id: RoomId,
}

/// Room-change command: create a booking in `room_id`, then drop `booking_id`.
///
/// Both mutations happen in one atomic unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplaceBooking {
    /// Booking being replaced; must belong to `user_id`
    pub booking_id: BookingId,
    /// Holder
    pub user_id: UserId,
    /// New room
    pub room_id: RoomId,
}

// ============================================================================
// Enrollment & tickets
// ============================================================================

/// A user's registration for the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Enrollment id
    pub id: EnrollmentId,
    /// Enrolled user
    pub user_id: UserId,
}

/// Payment status of a ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Reserved, not yet paid
    Reserved,
    /// Paid
    Paid,
}

impl TicketStatus {
    /// Database representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "RESERVED",
            Self::Paid => "PAID",
        }
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RESERVED" => Ok(Self::Reserved),
            "PAID" => Ok(Self::Paid),
            other => Err(BookingError::Storage(format!("Unknown ticket status: {other}"))),
        }
    }
}

/// Flags of a ticket type relevant to accommodation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    /// Remote (online) attendance
    pub is_remote: bool,
    /// Accommodation included
    pub includes_hotel: bool,
}

/// A purchased admission tied to an enrollment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Ticket id
    pub id: TicketId,
    /// Owning enrollment
    pub enrollment_id: EnrollmentId,
    /// Payment status
    pub status: TicketStatus,
    /// Type flags
    pub ticket_type: TicketType,
}

/// Snapshot of a user's enrollment and ticket state.
///
/// Recomputed on every request, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TicketEligibility {
    /// The user is enrolled
    pub has_enrollment: bool,
    /// The enrollment has a ticket
    pub has_ticket: bool,
    /// The ticket is paid
    pub is_paid: bool,
    /// The ticket is for remote attendance
    pub is_remote: bool,
    /// The ticket type includes accommodation
    pub includes_hotel: bool,
}

impl TicketEligibility {
    /// Build the snapshot from the enrollment and ticket records.
    #[must_use]
    pub fn from_records(enrollment: Option<&Enrollment>, ticket: Option<&Ticket>) -> Self {
        Self {
            has_enrollment: enrollment.is_some(),
            has_ticket: ticket.is_some(),
            is_paid: ticket.is_some_and(|t| t.status == TicketStatus::Paid),
            is_remote: ticket.is_some_and(|t| t.ticket_type.is_remote),
            includes_hotel: ticket.is_some_and(|t| t.ticket_type.includes_hotel),
        }
    }

    /// Check the snapshot, reporting the first failing condition.
    ///
    /// # Errors
    ///
    /// - `NotFound(Enrollment)` if the user is not enrolled
    /// - `NotEligible(..)` if the ticket is missing, unpaid, remote or
    ///   excludes accommodation
    pub fn check(&self) -> crate::error::Result<()> {
        if !self.has_enrollment {
            return Err(BookingError::NotFound(Resource::Enrollment));
        }
        if !self.has_ticket {
            return Err(BookingError::NotEligible(IneligibilityReason::NoTicket));
        }
        if !self.is_paid {
            return Err(BookingError::NotEligible(IneligibilityReason::Unpaid));
        }
        if self.is_remote {
            return Err(BookingError::NotEligible(IneligibilityReason::Remote));
        }
        if !self.includes_hotel {
            return Err(BookingError::NotEligible(IneligibilityReason::HotelNotIncluded));
        }
        Ok(())
    }

    /// Returns `true` if the user may hold a booking.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.check().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn room(capacity: i32) -> Room {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).single().unwrap_or_default();
        Room {
            id: RoomId::new(3),
            name: "Suite 3".to_string(),
            capacity,
            hotel_id: HotelId::new(9),
            created_at: at,
            updated_at: at,
        }
    }

    fn ticket(status: TicketStatus, is_remote: bool, includes_hotel: bool) -> Ticket {
        Ticket {
            id: TicketId::new(1),
            enrollment_id: EnrollmentId::new(1),
            status,
            ticket_type: TicketType { is_remote, includes_hotel },
        }
    }

    const ENROLLMENT: Enrollment = Enrollment {
        id: EnrollmentId::new(1),
        user_id: UserId::new(1),
    };

    #[test]
    fn test_booking_with_room_json_shape() {
        let booking = BookingWithRoom {
            id: BookingId::new(42),
            room: room(2),
        };
        let json = serde_json::to_value(&booking).unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 42,
                "Room": {
                    "id": 3,
                    "name": "Suite 3",
                    "capacity": 2,
                    "hotelId": 9,
                    "createdAt": "2024-01-01T12:00:00Z",
                    "updatedAt": "2024-01-01T12:00:00Z"
                }
            })
        );
    }

    #[test]
    fn test_ticket_status_round_trips_database_text() {
        assert_eq!("PAID".parse::<TicketStatus>(), Ok(TicketStatus::Paid));
        assert_eq!(TicketStatus::Reserved.as_str(), "RESERVED");
        assert!("CANCELLED".parse::<TicketStatus>().is_err());
    }

    #[test]
    fn test_missing_enrollment_is_not_found() {
        let snapshot = TicketEligibility::from_records(None, None);
        assert_eq!(snapshot.check(), Err(BookingError::NotFound(Resource::Enrollment)));
    }

    #[test]
    fn test_missing_ticket_is_not_eligible() {
        let snapshot = TicketEligibility::from_records(Some(&ENROLLMENT), None);
        assert_eq!(
            snapshot.check(),
            Err(BookingError::NotEligible(IneligibilityReason::NoTicket))
        );
    }

    #[test]
    fn test_paid_in_person_hotel_ticket_is_eligible() {
        let t = ticket(TicketStatus::Paid, false, true);
        assert!(TicketEligibility::from_records(Some(&ENROLLMENT), Some(&t)).is_eligible());
    }

    #[test]
    fn test_zero_capacity_room_is_always_full() {
        assert!(room(0).is_full(0));
        assert!(room(-1).is_full(0));
    }

    proptest! {
        #[test]
        fn prop_eligible_iff_paid_in_person_with_hotel(
            paid in any::<bool>(),
            remote in any::<bool>(),
            hotel in any::<bool>(),
        ) {
            let status = if paid { TicketStatus::Paid } else { TicketStatus::Reserved };
            let t = ticket(status, remote, hotel);
            let snapshot = TicketEligibility::from_records(Some(&ENROLLMENT), Some(&t));
            prop_assert_eq!(snapshot.is_eligible(), paid && !remote && hotel);
            if let Err(err) = snapshot.check() {
                prop_assert!(matches!(err, BookingError::NotEligible(_)));
            }
        }

        #[test]
        fn prop_room_full_iff_count_reaches_capacity(capacity in 1i32..50, occupied in 0usize..100) {
            let expected = occupied >= usize::try_from(capacity).unwrap_or(0);
            prop_assert_eq!(room(capacity).is_full(occupied), expected);
        }
    }
}
