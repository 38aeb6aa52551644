//! Mock room catalog for testing.

use super::poisoned;
use crate::providers::RoomCatalog;
use hotel_booking_core::{Result, Room, RoomId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock room catalog.
///
/// Clones share the same rooms.
#[derive(Debug, Clone, Default)]
pub struct MockRoomCatalog {
    rooms: Arc<Mutex<HashMap<RoomId, Room>>>,
}

impl MockRoomCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite a room.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the mock's lock is poisoned.
    pub fn insert(&self, room: Room) -> Result<()> {
        self.rooms.lock().map_err(poisoned)?.insert(room.id, room);
        Ok(())
    }

    /// Synchronous lookup, shared with [`super::MockBookingStore`].
    pub(crate) fn get(&self, room_id: RoomId) -> Result<Option<Room>> {
        Ok(self.rooms.lock().map_err(poisoned)?.get(&room_id).cloned())
    }
}

impl RoomCatalog for MockRoomCatalog {
    async fn find_room(&self, room_id: RoomId) -> Result<Option<Room>> {
        self.get(room_id)
    }
}
