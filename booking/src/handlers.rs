//! Booking HTTP handlers.
//!
//! | Route                   | Success                      |
//! |-------------------------|------------------------------|
//! | `GET /booking`          | 200 `{ id, Room: { .. } }`   |
//! | `POST /booking`         | 201 `{ bookingId }`          |
//! | `PUT /booking/:bookingId` | 201 `{ bookingId }`        |
//!
//! The read path and the write paths fold engine errors onto status codes
//! differently: an ineligible ticket or a storage failure is 402 on read,
//! while on write they are 403 and 400.

use crate::auth::AuthenticatedUser;
use crate::providers::{BookingStore, EnrollmentProvider, RoomCatalog, SessionStore};
use crate::router::BookingApiState;
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use hotel_booking_core::{BookingError, BookingId, BookingWithRoom, RoomId};
use hotel_booking_web::{AppError, CorrelationId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of `POST /booking` and `PUT /booking/:bookingId`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Room to book.
    pub room_id: i32,
}

/// Response after a booking is created or replaced.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreatedResponse {
    /// Id of the new booking.
    pub booking_id: BookingId,
}

/// Map an engine error on the read path.
fn read_error(err: BookingError) -> AppError {
    match err {
        BookingError::NotFound(_) => AppError::not_found(err.to_string()),
        BookingError::Storage(_) => AppError::payment_required("Failed to load booking")
            .with_source(anyhow::Error::new(err)),
        _ => AppError::payment_required(err.to_string()),
    }
}

/// Map an engine error on the write paths.
fn write_error(err: BookingError) -> AppError {
    match err {
        BookingError::NotFound(_) => AppError::not_found(err.to_string()),
        BookingError::Storage(_) => {
            AppError::bad_request("Booking could not be saved").with_source(anyhow::Error::new(err))
        }
        _ => AppError::forbidden(err.to_string()),
    }
}

fn parse_body(payload: Result<Json<BookingRequest>, JsonRejection>) -> Result<RoomId, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    Ok(RoomId::new(request.room_id))
}

/// Get the caller's booking.
///
/// # Endpoint
///
/// ```text
/// GET /booking
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": 12,
///   "Room": {
///     "id": 3,
///     "name": "101",
///     "capacity": 2,
///     "hotelId": 1,
///     "createdAt": "2025-01-01T00:00:00Z",
///     "updatedAt": "2025-01-01T00:00:00Z"
///   }
/// }
/// ```
pub async fn get_booking<E, R, B, S>(
    State(state): State<Arc<BookingApiState<E, R, B, S>>>,
    correlation_id: CorrelationId,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<BookingWithRoom>, AppError>
where
    E: EnrollmentProvider + 'static,
    R: RoomCatalog + 'static,
    B: BookingStore + 'static,
    S: SessionStore + 'static,
{
    tracing::debug!(correlation_id = %correlation_id.0, user_id = %user_id, "Get booking");

    let booking = state
        .engine
        .get_current_booking(user_id)
        .await
        .map_err(read_error)?;

    Ok(Json(booking))
}

/// Book a room for the caller.
///
/// # Endpoint
///
/// ```text
/// POST /booking
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "roomId": 3 }
/// ```
///
/// # Response
///
/// `201 Created` with `{ "bookingId": 12 }`.
pub async fn create_booking<E, R, B, S>(
    State(state): State<Arc<BookingApiState<E, R, B, S>>>,
    correlation_id: CorrelationId,
    AuthenticatedUser(user_id): AuthenticatedUser,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingCreatedResponse>), AppError>
where
    E: EnrollmentProvider + 'static,
    R: RoomCatalog + 'static,
    B: BookingStore + 'static,
    S: SessionStore + 'static,
{
    let room_id = parse_body(payload)?;
    tracing::debug!(correlation_id = %correlation_id.0, user_id = %user_id, room_id = %room_id, "Create booking");

    let booking = state
        .engine
        .create_booking(user_id, room_id)
        .await
        .map_err(write_error)?;

    Ok((
        StatusCode::CREATED,
        Json(BookingCreatedResponse {
            booking_id: booking.id,
        }),
    ))
}

/// Move the caller's booking to another room.
///
/// # Endpoint
///
/// ```text
/// PUT /booking/:bookingId
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "roomId": 4 }
/// ```
///
/// # Response
///
/// `201 Created` with the id of the new booking; the old id is gone.
pub async fn replace_booking<E, R, B, S>(
    State(state): State<Arc<BookingApiState<E, R, B, S>>>,
    correlation_id: CorrelationId,
    AuthenticatedUser(user_id): AuthenticatedUser,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingCreatedResponse>), AppError>
where
    E: EnrollmentProvider + 'static,
    R: RoomCatalog + 'static,
    B: BookingStore + 'static,
    S: SessionStore + 'static,
{
    let Path(booking_id) = path.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let booking_id = BookingId::new(booking_id);
    let room_id = parse_body(payload)?;
    tracing::debug!(
        correlation_id = %correlation_id.0,
        user_id = %user_id,
        room_id = %room_id,
        booking_id = %booking_id,
        "Replace booking"
    );

    let booking = state
        .engine
        .replace_booking(user_id, room_id, booking_id)
        .await
        .map_err(write_error)?;

    Ok((
        StatusCode::CREATED,
        Json(BookingCreatedResponse {
            booking_id: booking.id,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_booking_core::{IneligibilityReason, Resource, UserId};

    #[test]
    fn test_ineligible_is_402_on_read_and_403_on_write() {
        let err = BookingError::NotEligible(IneligibilityReason::Remote);
        assert_eq!(read_error(err.clone()).status(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(write_error(err).status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_storage_is_402_on_read_and_400_on_write() {
        let err = BookingError::Storage("connection reset".into());
        let read = read_error(err.clone());
        assert_eq!(read.status(), StatusCode::PAYMENT_REQUIRED);
        assert!(std::error::Error::source(&read).is_some());
        assert_eq!(write_error(err).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_rejections_coalesce_to_403() {
        for err in [
            BookingError::RoomFull {
                room_id: RoomId::new(1),
                capacity: 1,
            },
            BookingError::AlreadyBooked {
                user_id: UserId::new(1),
            },
            BookingError::BookingMismatch {
                user_id: UserId::new(1),
                booking_id: BookingId::new(5),
            },
        ] {
            assert_eq!(write_error(err).status(), StatusCode::FORBIDDEN);
        }
        assert_eq!(
            write_error(BookingError::NotFound(Resource::Room)).status(),
            StatusCode::NOT_FOUND
        );
    }
}
