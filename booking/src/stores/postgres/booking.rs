//! `PostgreSQL` booking store.
//!
//! # Guarded writes
//!
//! `create_booking` and `replace_booking` run in one transaction each:
//!
//! 1. `SELECT ... FOR UPDATE` on the target `"Room"` row serializes writers
//!    per room, so the booking count read next cannot go stale
//! 2. count the room's bookings and compare with its capacity
//! 3. for a replacement, lock the old booking filtered by id AND user; a
//!    concurrent replace of the same booking blocks here and then misses
//! 4. write; for a replacement, insert first, then delete the old booking
//!
//! The one-booking-per-user rule is backed by the deferred unique
//! constraint `"Booking_userId_key"`. It is checked at commit, which lets a
//! replacement hold two rows mid-transaction; a violation at commit means
//! a concurrent request booked for the same user and maps to
//! `AlreadyBooked`.

use super::room::{ROOM_COLUMNS, RoomRow};
use super::{is_unique_violation, storage};
use crate::providers::BookingStore;
use chrono::{DateTime, Utc};
use hotel_booking_core::{
    Booking, BookingError, BookingId, BookingWithRoom, NewBooking, ReplaceBooking, Resource,
    Result, RoomId, UserId,
};
use sqlx::{PgPool, Postgres, Transaction};

const BOOKING_COLUMNS: &str = r#""id", "userId" AS user_id, "roomId" AS room_id,
       "createdAt" AS created_at, "updatedAt" AS updated_at"#;

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i32,
    user_id: i32,
    room_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: BookingId::new(row.id),
            user_id: UserId::new(row.user_id),
            room_id: RoomId::new(row.room_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BookingWithRoomRow {
    booking_id: i32,
    #[sqlx(flatten)]
    room: RoomRow,
}

/// `PostgreSQL` booking store over `"Booking"`.
#[derive(Clone)]
pub struct PostgresBookingStore {
    /// `PostgreSQL` connection pool.
    pool: PgPool,
}

impl PostgresBookingStore {
    /// Create a new store over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock the room row and check it has a free slot.
    async fn lock_room_with_slot(
        tx: &mut Transaction<'_, Postgres>,
        room_id: RoomId,
    ) -> Result<()> {
        let capacity: Option<i32> =
            sqlx::query_scalar(r#"SELECT "capacity" FROM "Room" WHERE "id" = $1 FOR UPDATE"#)
                .bind(room_id.get())
                .fetch_optional(&mut **tx)
                .await
                .map_err(storage("lock room"))?;
        let capacity = capacity.ok_or(BookingError::NotFound(Resource::Room))?;

        let occupied: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "Booking" WHERE "roomId" = $1"#)
            .bind(room_id.get())
            .fetch_one(&mut **tx)
            .await
            .map_err(storage("count room bookings"))?;

        if occupied >= i64::from(capacity) {
            return Err(BookingError::RoomFull { room_id, capacity });
        }
        Ok(())
    }

    /// Lock the booking being replaced; it must belong to the user.
    ///
    /// A concurrent replace of the same booking waits here, then finds the
    /// row gone and reports a mismatch.
    async fn lock_owned_booking(
        tx: &mut Transaction<'_, Postgres>,
        replace: &ReplaceBooking,
    ) -> Result<()> {
        let owned: Option<i32> = sqlx::query_scalar(
            r#"SELECT "id" FROM "Booking" WHERE "id" = $1 AND "userId" = $2 FOR UPDATE"#,
        )
        .bind(replace.booking_id.get())
        .bind(replace.user_id.get())
        .fetch_optional(&mut **tx)
        .await
        .map_err(storage("lock replaced booking"))?;

        if owned.is_none() {
            return Err(BookingError::BookingMismatch {
                user_id: replace.user_id,
                booking_id: replace.booking_id,
            });
        }
        Ok(())
    }

    async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<Booking> {
        let sql = format!(
            r#"INSERT INTO "Booking" ("userId", "roomId") VALUES ($1, $2) RETURNING {BOOKING_COLUMNS}"#
        );
        let row: BookingRow = sqlx::query_as(&sql)
            .bind(user_id.get())
            .bind(room_id.get())
            .fetch_one(&mut **tx)
            .await
            .map_err(storage("insert booking"))?;
        Ok(row.into())
    }

    async fn commit(tx: Transaction<'_, Postgres>, user_id: UserId) -> Result<()> {
        tx.commit().await.map_err(|e| {
            if is_unique_violation(&e) {
                BookingError::AlreadyBooked { user_id }
            } else {
                storage("commit booking")(e)
            }
        })
    }
}

impl BookingStore for PostgresBookingStore {
    async fn find_user_booking(&self, user_id: UserId) -> Result<Option<BookingWithRoom>> {
        let sql = format!(
            r#"
            SELECT b."id" AS booking_id, {ROOM_COLUMNS}
            FROM "Booking" b
            JOIN "Room" r ON r."id" = b."roomId"
            WHERE b."userId" = $1
            ORDER BY b."id"
            LIMIT 1
            "#
        );
        let row: Option<BookingWithRoomRow> = sqlx::query_as(&sql)
            .bind(user_id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage("load user booking"))?;

        Ok(row.map(|row| BookingWithRoom {
            id: BookingId::new(row.booking_id),
            room: row.room.into(),
        }))
    }

    async fn find_bookings_by_room(&self, room_id: RoomId) -> Result<Vec<Booking>> {
        let sql = format!(r#"SELECT {BOOKING_COLUMNS} FROM "Booking" WHERE "roomId" = $1 ORDER BY "id""#);
        let rows: Vec<BookingRow> = sqlx::query_as(&sql)
            .bind(room_id.get())
            .fetch_all(&self.pool)
            .await
            .map_err(storage("load room bookings"))?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<Booking> {
        let mut tx = self.pool.begin().await.map_err(storage("begin transaction"))?;

        Self::lock_room_with_slot(&mut tx, booking.room_id).await?;

        let existing: Option<i32> =
            sqlx::query_scalar(r#"SELECT "id" FROM "Booking" WHERE "userId" = $1 FOR UPDATE"#)
                .bind(booking.user_id.get())
                .fetch_optional(&mut *tx)
                .await
                .map_err(storage("check user booking"))?;
        if existing.is_some() {
            return Err(BookingError::AlreadyBooked {
                user_id: booking.user_id,
            });
        }

        let created = Self::insert(&mut tx, booking.user_id, booking.room_id).await?;
        Self::commit(tx, booking.user_id).await?;

        tracing::debug!(booking_id = %created.id, "Booking row inserted");
        Ok(created)
    }

    async fn replace_booking(&self, replace: ReplaceBooking) -> Result<Booking> {
        let mut tx = self.pool.begin().await.map_err(storage("begin transaction"))?;

        Self::lock_room_with_slot(&mut tx, replace.room_id).await?;
        Self::lock_owned_booking(&mut tx, &replace).await?;

        let created = Self::insert(&mut tx, replace.user_id, replace.room_id).await?;

        sqlx::query(r#"DELETE FROM "Booking" WHERE "id" = $1"#)
            .bind(replace.booking_id.get())
            .execute(&mut *tx)
            .await
            .map_err(storage("delete replaced booking"))?;

        Self::commit(tx, replace.user_id).await?;

        tracing::debug!(
            old_booking_id = %replace.booking_id,
            booking_id = %created.id,
            "Booking row replaced"
        );
        Ok(created)
    }

    async fn delete_booking(&self, booking_id: BookingId) -> Result<()> {
        sqlx::query(r#"DELETE FROM "Booking" WHERE "id" = $1"#)
            .bind(booking_id.get())
            .execute(&self.pool)
            .await
            .map_err(storage("delete booking"))?;
        Ok(())
    }
}
