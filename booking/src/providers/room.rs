//! Room catalog.

use hotel_booking_core::{Result, Room, RoomId};

/// Resolves room identifiers to rooms.
pub trait RoomCatalog: Send + Sync {
    /// Find a room by id.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the lookup fails.
    fn find_room(
        &self,
        room_id: RoomId,
    ) -> impl std::future::Future<Output = Result<Option<Room>>> + Send;
}
