//! Error types for booking operations.

use crate::types::{BookingId, RoomId, UserId};
use std::fmt;
use thiserror::Error;

/// Result type alias for booking operations.
pub type Result<T> = std::result::Result<T, BookingError>;

/// Entity a `NotFound` error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// The user's event enrollment.
    Enrollment,
    /// A hotel room.
    Room,
    /// A booking.
    Booking,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enrollment => write!(f, "Enrollment"),
            Self::Room => write!(f, "Room"),
            Self::Booking => write!(f, "Booking"),
        }
    }
}

/// Why a ticket does not entitle its holder to a hotel room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IneligibilityReason {
    /// The enrollment has no ticket.
    NoTicket,
    /// The ticket is reserved but not paid.
    Unpaid,
    /// The ticket is for remote attendance.
    Remote,
    /// The ticket type does not include accommodation.
    HotelNotIncluded,
}

impl IneligibilityReason {
    /// Stable label, used for metrics and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoTicket => "no_ticket",
            Self::Unpaid => "unpaid",
            Self::Remote => "remote",
            Self::HotelNotIncluded => "hotel_not_included",
        }
    }
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTicket => write!(f, "no ticket for enrollment"),
            Self::Unpaid => write!(f, "ticket is not paid"),
            Self::Remote => write!(f, "ticket is remote"),
            Self::HotelNotIncluded => write!(f, "ticket type does not include hotel"),
        }
    }
}

/// Failure taxonomy of the booking engine.
///
/// The HTTP boundary folds several of these onto the same status code
/// (403 covers `RoomFull`, `AlreadyBooked` and `BookingMismatch`), but they
/// stay distinct here so callers and tests can tell them apart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Referenced enrollment, room or booking does not exist.
    #[error("{0} not found")]
    NotFound(Resource),

    /// The user's ticket does not entitle them to a room.
    #[error("Not eligible for hotel booking: {0}")]
    NotEligible(IneligibilityReason),

    /// The room already holds as many bookings as its capacity.
    #[error("Room {room_id} is at full capacity ({capacity})")]
    RoomFull {
        /// Room that was requested
        room_id: RoomId,
        /// Its capacity
        capacity: i32,
    },

    /// The user already holds a booking.
    #[error("User {user_id} already holds a booking")]
    AlreadyBooked {
        /// User that attempted the booking
        user_id: UserId,
    },

    /// The booking id supplied for a room change is not the user's booking.
    #[error("Booking {booking_id} is not the active booking of user {user_id}")]
    BookingMismatch {
        /// User that attempted the change
        user_id: UserId,
        /// Booking id supplied by the user
        booking_id: BookingId,
    },

    /// Database or adapter failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BookingError {
    /// Stable label of the error kind, used for metrics and logs.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hotel_booking_core::{BookingError, Resource};
    /// assert_eq!(BookingError::NotFound(Resource::Room).kind(), "not_found");
    /// ```
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::NotEligible(_) => "not_eligible",
            Self::RoomFull { .. } => "room_full",
            Self::AlreadyBooked { .. } => "already_booked",
            Self::BookingMismatch { .. } => "booking_mismatch",
            Self::Storage(_) => "storage",
        }
    }

    /// Returns `true` for business-rule rejections, `false` for infrastructure failures.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}
