//! Booking eligibility engine.
//!
//! Every operation checks its preconditions fail-fast, in a fixed order:
//!
//! | Operation             | Checks, in order                                       |
//! |-----------------------|--------------------------------------------------------|
//! | `get_current_booking` | bookable, booking exists                               |
//! | `create_booking`      | room has capacity, bookable, user has no booking       |
//! | `replace_booking`     | new room has capacity, bookable, booking is the user's |
//!
//! The checks give callers precise errors without touching the write path.
//! They are not authoritative: the store repeats capacity and ownership
//! checks atomically with the write.

use crate::metrics::{BookingMetrics, Operation};
use crate::providers::{BookingStore, EnrollmentProvider, RoomCatalog};
use hotel_booking_core::{
    Booking, BookingError, BookingId, BookingWithRoom, NewBooking, ReplaceBooking, Resource,
    Result, Room, RoomId, TicketEligibility, UserId,
};
use std::future::Future;
use std::time::Instant;

/// Booking engine over an enrollment provider, a room catalog and a booking
/// store.
#[derive(Debug, Clone)]
pub struct BookingEngine<E, R, B> {
    enrollments: E,
    rooms: R,
    bookings: B,
}

impl<E, R, B> BookingEngine<E, R, B>
where
    E: EnrollmentProvider,
    R: RoomCatalog,
    B: BookingStore,
{
    /// Create a new engine.
    #[must_use]
    pub const fn new(enrollments: E, rooms: R, bookings: B) -> Self {
        Self {
            enrollments,
            rooms,
            bookings,
        }
    }

    /// The booking store.
    #[must_use]
    pub const fn bookings(&self) -> &B {
        &self.bookings
    }

    /// Check that `user_id` may hold a booking.
    ///
    /// # Errors
    ///
    /// - `NotFound(Enrollment)`: the user is not enrolled
    /// - `NotEligible`: no ticket, unpaid, remote, or no accommodation
    /// - `Storage`: a lookup failed
    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn assert_bookable(&self, user_id: UserId) -> Result<()> {
        let enrollment = self.enrollments.find_enrollment(user_id).await?;
        let ticket = match &enrollment {
            Some(enrollment) => self.enrollments.find_ticket(enrollment.id).await?,
            None => None,
        };

        let eligibility = TicketEligibility::from_records(enrollment.as_ref(), ticket.as_ref());
        eligibility.check().inspect_err(|err| {
            tracing::debug!(reason = %err, "User is not bookable");
        })
    }

    /// Check that `room_id` exists and has a free slot. Returns the room.
    ///
    /// # Errors
    ///
    /// - `NotFound(Room)`: no such room
    /// - `RoomFull`: bookings for the room reached its capacity
    /// - `Storage`: a lookup failed
    #[tracing::instrument(skip(self), fields(room_id = %room_id))]
    pub async fn assert_room_has_capacity(&self, room_id: RoomId) -> Result<Room> {
        let room = self
            .rooms
            .find_room(room_id)
            .await?
            .ok_or(BookingError::NotFound(Resource::Room))?;

        let occupied = self.bookings.find_bookings_by_room(room_id).await?.len();
        if room.is_full(occupied) {
            tracing::debug!(occupied, capacity = room.capacity, "Room is full");
            return Err(BookingError::RoomFull {
                room_id,
                capacity: room.capacity,
            });
        }

        Ok(room)
    }

    /// Return the booking held by `user_id`, with its room.
    ///
    /// # Errors
    ///
    /// - `NotFound(Enrollment)` / `NotEligible`: see [`Self::assert_bookable`]
    /// - `NotFound(Booking)`: the user holds no booking
    /// - `Storage`: a lookup failed
    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_current_booking(&self, user_id: UserId) -> Result<BookingWithRoom> {
        observe(Operation::GetCurrent, async {
            self.assert_bookable(user_id).await?;
            self.bookings
                .find_user_booking(user_id)
                .await?
                .ok_or(BookingError::NotFound(Resource::Booking))
        })
        .await
    }

    /// Reserve `room_id` for `user_id`.
    ///
    /// # Errors
    ///
    /// - `NotFound(Room)` / `RoomFull`: see [`Self::assert_room_has_capacity`]
    /// - `NotFound(Enrollment)` / `NotEligible`: see [`Self::assert_bookable`]
    /// - `AlreadyBooked`: the user already holds a booking
    /// - `Storage`: a lookup or the insert failed
    #[tracing::instrument(skip(self), fields(user_id = %user_id, room_id = %room_id))]
    pub async fn create_booking(&self, user_id: UserId, room_id: RoomId) -> Result<Booking> {
        observe(Operation::Create, async {
            self.assert_room_has_capacity(room_id).await?;
            self.assert_bookable(user_id).await?;

            if self.bookings.find_user_booking(user_id).await?.is_some() {
                return Err(BookingError::AlreadyBooked { user_id });
            }

            let booking = self
                .bookings
                .create_booking(NewBooking { user_id, room_id })
                .await?;

            tracing::info!(booking_id = %booking.id, "Booking created");
            Ok(booking)
        })
        .await
    }

    /// Move the booking `booking_id` of `user_id` to `room_id`.
    ///
    /// The new booking is created before the old one is deleted, atomically.
    ///
    /// # Errors
    ///
    /// - `NotFound(Room)` / `RoomFull`: the new room, see
    ///   [`Self::assert_room_has_capacity`]
    /// - `NotFound(Enrollment)` / `NotEligible`: see [`Self::assert_bookable`]
    /// - `BookingMismatch`: the user holds no booking, or a different one;
    ///   the existing booking is left unchanged
    /// - `Storage`: a lookup or the write failed
    #[tracing::instrument(
        skip(self),
        fields(user_id = %user_id, room_id = %room_id, booking_id = %booking_id)
    )]
    pub async fn replace_booking(
        &self,
        user_id: UserId,
        room_id: RoomId,
        booking_id: BookingId,
    ) -> Result<Booking> {
        observe(Operation::Replace, async {
            self.assert_room_has_capacity(room_id).await?;
            self.assert_bookable(user_id).await?;

            let current = self.bookings.find_user_booking(user_id).await?;
            if current.map(|b| b.id) != Some(booking_id) {
                return Err(BookingError::BookingMismatch {
                    user_id,
                    booking_id,
                });
            }

            let booking = self
                .bookings
                .replace_booking(ReplaceBooking {
                    booking_id,
                    user_id,
                    room_id,
                })
                .await?;

            tracing::info!(new_booking_id = %booking.id, "Booking replaced");
            Ok(booking)
        })
        .await
    }
}

async fn observe<T>(operation: Operation, fut: impl Future<Output = Result<T>>) -> Result<T> {
    BookingMetrics::record_request(operation);
    let started = Instant::now();

    let result = fut.await;

    if let Err(err) = &result {
        if err.is_rejection() {
            tracing::info!(operation = operation.as_str(), kind = err.kind(), error = %err, "Booking rejected");
        } else {
            tracing::error!(operation = operation.as_str(), error = %err, "Booking operation failed");
        }
    }
    BookingMetrics::record_outcome(operation, result.as_ref().err(), started.elapsed());

    result
}
