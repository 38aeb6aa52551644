//! `PostgreSQL` room catalog.

use super::storage;
use crate::providers::RoomCatalog;
use chrono::{DateTime, Utc};
use hotel_booking_core::{HotelId, Result, Room, RoomId};
use sqlx::PgPool;

/// Columns of `"Room"`, aliased to the row struct's field names.
pub(super) const ROOM_COLUMNS: &str = r#"r."id", r."name", r."capacity", r."hotelId" AS hotel_id,
       r."createdAt" AS created_at, r."updatedAt" AS updated_at"#;

#[derive(sqlx::FromRow)]
pub(super) struct RoomRow {
    pub(super) id: i32,
    pub(super) name: String,
    pub(super) capacity: i32,
    pub(super) hotel_id: i32,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Self {
            id: RoomId::new(row.id),
            name: row.name,
            capacity: row.capacity,
            hotel_id: HotelId::new(row.hotel_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// `PostgreSQL` room catalog.
#[derive(Clone)]
pub struct PostgresRoomCatalog {
    /// `PostgreSQL` connection pool.
    pool: PgPool,
}

impl PostgresRoomCatalog {
    /// Create a new catalog over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RoomCatalog for PostgresRoomCatalog {
    async fn find_room(&self, room_id: RoomId) -> Result<Option<Room>> {
        let sql = format!(r#"SELECT {ROOM_COLUMNS} FROM "Room" r WHERE r."id" = $1"#);
        let row: Option<RoomRow> = sqlx::query_as(&sql)
            .bind(room_id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage("load room"))?;

        Ok(row.map(Room::from))
    }
}
