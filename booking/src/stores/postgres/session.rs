//! `PostgreSQL` session store.

use super::storage;
use crate::providers::{Session, SessionStore};
use hotel_booking_core::{Result, UserId};
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: i32,
    user_id: i32,
    token: String,
}

/// `PostgreSQL` session store over `"Session"`.
#[derive(Clone)]
pub struct PostgresSessionStore {
    /// `PostgreSQL` connection pool.
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Create a new store over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SessionStore for PostgresSessionStore {
    async fn find_session(&self, token: &str) -> Result<Option<Session>> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT "id", "userId" AS user_id, "token"
            FROM "Session"
            WHERE "token" = $1
            ORDER BY "id" DESC
            LIMIT 1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage("load session"))?;

        Ok(row.map(|row| Session {
            id: row.id,
            user_id: UserId::new(row.user_id),
            token: row.token,
        }))
    }
}
