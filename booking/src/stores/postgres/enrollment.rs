//! `PostgreSQL` enrollment provider.

use super::storage;
use crate::providers::EnrollmentProvider;
use hotel_booking_core::{
    Enrollment, EnrollmentId, Result, Ticket, TicketId, TicketStatus, TicketType, UserId,
};
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct EnrollmentRow {
    id: i32,
    user_id: i32,
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: i32,
    enrollment_id: i32,
    status: String,
    is_remote: bool,
    includes_hotel: bool,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = hotel_booking_core::BookingError;

    fn try_from(row: TicketRow) -> Result<Self> {
        Ok(Self {
            id: TicketId::new(row.id),
            enrollment_id: EnrollmentId::new(row.enrollment_id),
            status: row.status.parse::<TicketStatus>()?,
            ticket_type: TicketType {
                is_remote: row.is_remote,
                includes_hotel: row.includes_hotel,
            },
        })
    }
}

/// `PostgreSQL` enrollment provider.
///
/// Reads `"Enrollment"`, `"Ticket"` and `"TicketType"`.
#[derive(Clone)]
pub struct PostgresEnrollmentProvider {
    /// `PostgreSQL` connection pool.
    pool: PgPool,
}

impl PostgresEnrollmentProvider {
    /// Create a new provider over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl EnrollmentProvider for PostgresEnrollmentProvider {
    async fn find_enrollment(&self, user_id: UserId) -> Result<Option<Enrollment>> {
        let row: Option<EnrollmentRow> = sqlx::query_as(
            r#"SELECT "id", "userId" AS user_id FROM "Enrollment" WHERE "userId" = $1"#,
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage("load enrollment"))?;

        Ok(row.map(|row| Enrollment {
            id: EnrollmentId::new(row.id),
            user_id: UserId::new(row.user_id),
        }))
    }

    async fn find_ticket(&self, enrollment_id: EnrollmentId) -> Result<Option<Ticket>> {
        let row: Option<TicketRow> = sqlx::query_as(
            r#"
            SELECT t."id", t."enrollmentId" AS enrollment_id, t."status",
                   tt."isRemote" AS is_remote, tt."includesHotel" AS includes_hotel
            FROM "Ticket" t
            JOIN "TicketType" tt ON tt."id" = t."ticketTypeId"
            WHERE t."enrollmentId" = $1
            "#,
        )
        .bind(enrollment_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage("load ticket"))?;

        row.map(Ticket::try_from).transpose()
    }
}
