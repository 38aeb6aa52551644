//! Mock booking store for testing.

use super::{MockRoomCatalog, poisoned};
use crate::providers::BookingStore;
use hotel_booking_core::environment::{Clock, SystemClock};
use hotel_booking_core::{
    Booking, BookingError, BookingId, BookingWithRoom, NewBooking, ReplaceBooking, Resource,
    Result, Room, RoomId, UserId,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct BookingTable {
    rows: BTreeMap<BookingId, Booking>,
    last_id: i32,
}

impl BookingTable {
    fn by_user(&self, user_id: UserId) -> Option<&Booking> {
        self.rows.values().find(|b| b.user_id == user_id)
    }

    fn count_in_room(&self, room_id: RoomId) -> usize {
        self.rows.values().filter(|b| b.room_id == room_id).count()
    }

    fn insert(&mut self, user_id: UserId, room_id: RoomId, clock: &dyn Clock) -> Booking {
        self.last_id += 1;
        let now = clock.now();
        let booking = Booking {
            id: BookingId::new(self.last_id),
            user_id,
            room_id,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(booking.id, booking.clone());
        booking
    }
}

/// Mock booking store.
///
/// Guarded writes hold one mutex across check and mutation, so concurrent
/// callers observe the same capacity and uniqueness rules as the
/// `PostgreSQL` store. Rooms are read from a shared [`MockRoomCatalog`].
#[derive(Clone)]
pub struct MockBookingStore {
    table: Arc<Mutex<BookingTable>>,
    rooms: MockRoomCatalog,
    clock: Arc<dyn Clock>,
    unavailable: Arc<AtomicBool>,
}

impl std::fmt::Debug for MockBookingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBookingStore")
            .field("table", &self.table)
            .field("rooms", &self.rooms)
            .finish_non_exhaustive()
    }
}

impl MockBookingStore {
    /// Create an empty store reading rooms from `rooms`.
    #[must_use]
    pub fn new(rooms: MockRoomCatalog) -> Self {
        Self::with_clock(rooms, Arc::new(SystemClock))
    }

    /// Create an empty store stamping bookings with `clock`.
    #[must_use]
    pub fn with_clock(rooms: MockRoomCatalog, clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Arc::new(Mutex::new(BookingTable::default())),
            rooms,
            clock,
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every call fail with `BookingError::Storage` (for testing).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Insert a booking without any checks (for seeding tests).
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the mock's lock is poisoned.
    pub fn seed(&self, user_id: UserId, room_id: RoomId) -> Result<Booking> {
        let mut table = self.table.lock().map_err(poisoned)?;
        Ok(table.insert(user_id, room_id, self.clock.as_ref()))
    }

    /// Snapshot of all bookings, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the mock's lock is poisoned.
    pub fn all(&self) -> Result<Vec<Booking>> {
        Ok(self.table.lock().map_err(poisoned)?.rows.values().cloned().collect())
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(BookingError::Storage("mock booking store unavailable".to_string()));
        }
        Ok(())
    }

    fn room_with_slot(&self, table: &BookingTable, room_id: RoomId) -> Result<Room> {
        let room = self
            .rooms
            .get(room_id)?
            .ok_or(BookingError::NotFound(Resource::Room))?;
        if room.is_full(table.count_in_room(room_id)) {
            return Err(BookingError::RoomFull {
                room_id,
                capacity: room.capacity,
            });
        }
        Ok(room)
    }
}

impl BookingStore for MockBookingStore {
    async fn find_user_booking(&self, user_id: UserId) -> Result<Option<BookingWithRoom>> {
        self.ensure_available()?;
        let table = self.table.lock().map_err(poisoned)?;

        let Some(booking) = table.by_user(user_id) else {
            return Ok(None);
        };
        let room = self.rooms.get(booking.room_id)?.ok_or_else(|| {
            BookingError::Storage(format!("Booking {} references a missing room", booking.id))
        })?;

        Ok(Some(BookingWithRoom {
            id: booking.id,
            room,
        }))
    }

    async fn find_bookings_by_room(&self, room_id: RoomId) -> Result<Vec<Booking>> {
        self.ensure_available()?;
        let table = self.table.lock().map_err(poisoned)?;
        Ok(table
            .rows
            .values()
            .filter(|b| b.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<Booking> {
        self.ensure_available()?;
        let mut table = self.table.lock().map_err(poisoned)?;

        self.room_with_slot(&table, booking.room_id)?;
        if table.by_user(booking.user_id).is_some() {
            return Err(BookingError::AlreadyBooked {
                user_id: booking.user_id,
            });
        }

        Ok(table.insert(booking.user_id, booking.room_id, self.clock.as_ref()))
    }

    async fn replace_booking(&self, replace: ReplaceBooking) -> Result<Booking> {
        self.ensure_available()?;
        let mut table = self.table.lock().map_err(poisoned)?;

        self.room_with_slot(&table, replace.room_id)?;
        let owned = table
            .rows
            .get(&replace.booking_id)
            .is_some_and(|b| b.user_id == replace.user_id);
        if !owned {
            return Err(BookingError::BookingMismatch {
                user_id: replace.user_id,
                booking_id: replace.booking_id,
            });
        }

        let booking = table.insert(replace.user_id, replace.room_id, self.clock.as_ref());
        table.rows.remove(&replace.booking_id);
        Ok(booking)
    }

    async fn delete_booking(&self, booking_id: BookingId) -> Result<()> {
        self.ensure_available()?;
        self.table.lock().map_err(poisoned)?.rows.remove(&booking_id);
        Ok(())
    }
}
