//! Booking store trait.
//!
//! The only store this service writes to. Reads answer the engine's
//! fail-fast checks; writes are guarded and must re-evaluate the same rules
//! atomically with the mutation.

use hotel_booking_core::{
    Booking, BookingId, BookingWithRoom, NewBooking, ReplaceBooking, Result, RoomId, UserId,
};

/// Booking persistence.
///
/// # Implementation Notes
///
/// - **CRITICAL**: `create_booking()` and `replace_booking()` MUST check
///   room capacity and the one-booking-per-user rule inside the same atomic
///   unit as the write (`PostgreSQL`: transaction with the room row locked;
///   in-memory: one mutex held for check and write).
/// - `replace_booking()` inserts the new booking before deleting the old
///   one; no observer may see the user with zero or two bookings.
pub trait BookingStore: Send + Sync {
    /// Find the booking held by `user_id`, with its room.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the lookup fails.
    fn find_user_booking(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<BookingWithRoom>>> + Send;

    /// List the bookings of a room.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the lookup fails.
    fn find_bookings_by_room(
        &self,
        room_id: RoomId,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>>> + Send;

    /// Insert a booking.
    ///
    /// # Errors
    ///
    /// - `NotFound(Room)`: the room does not exist
    /// - `RoomFull`: the room reached capacity
    /// - `AlreadyBooked`: the user already holds a booking
    /// - `Storage`: the write failed
    fn create_booking(
        &self,
        booking: NewBooking,
    ) -> impl std::future::Future<Output = Result<Booking>> + Send;

    /// Insert a booking in the new room, then delete the replaced one.
    ///
    /// # Errors
    ///
    /// - `NotFound(Room)`: the new room does not exist
    /// - `RoomFull`: the new room reached capacity
    /// - `BookingMismatch`: `booking_id` is not a booking of `user_id`;
    ///   nothing is written
    /// - `Storage`: the write failed
    fn replace_booking(
        &self,
        replace: ReplaceBooking,
    ) -> impl std::future::Future<Output = Result<Booking>> + Send;

    /// Delete a booking by id. Deleting a missing booking is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the delete fails.
    fn delete_booking(
        &self,
        booking_id: BookingId,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
