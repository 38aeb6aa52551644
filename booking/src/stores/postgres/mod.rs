//! `PostgreSQL` adapters.
//!
//! One adapter per provider trait, all sharing a `PgPool`. Queries are
//! built at runtime (`query_as`), so building the crate needs no database.
//!
//! # Example
//!
//! ```no_run
//! use hotel_booking::stores::postgres::{self, PostgresBookingStore};
//! use sqlx::PgPool;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = PgPool::connect("postgres://localhost/hotel_booking").await?;
//! postgres::migrate(&pool).await?;
//! let bookings = PostgresBookingStore::new(pool);
//! # Ok(())
//! # }
//! ```

use hotel_booking_core::{BookingError, Result};
use sqlx::PgPool;

pub mod booking;
pub mod enrollment;
pub mod room;
pub mod session;

pub use booking::PostgresBookingStore;
pub use enrollment::PostgresEnrollmentProvider;
pub use room::PostgresRoomCatalog;
pub use session::PostgresSessionStore;

/// Run database migrations.
///
/// # Errors
///
/// Returns `BookingError::Storage` if a migration fails.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| BookingError::Storage(format!("Migration failed: {e}")))?;
    Ok(())
}

/// Wrap a `sqlx` error with the failed action.
fn storage(action: &'static str) -> impl FnOnce(sqlx::Error) -> BookingError {
    move |e| BookingError::Storage(format!("Failed to {action}: {e}"))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
