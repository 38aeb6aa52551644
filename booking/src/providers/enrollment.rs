//! Enrollment and ticket lookup.

use hotel_booking_core::{Enrollment, EnrollmentId, Result, Ticket, UserId};

/// Resolves a user's enrollment and its ticket.
///
/// Query-only: enrollments and tickets are owned by the event platform.
pub trait EnrollmentProvider: Send + Sync {
    /// Find the enrollment of `user_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Enrollment))`: the user is enrolled
    /// - `Ok(None)`: the user is not enrolled
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the lookup fails.
    fn find_enrollment(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<Enrollment>>> + Send;

    /// Find the ticket of an enrollment, with its type flags.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the lookup fails.
    fn find_ticket(
        &self,
        enrollment_id: EnrollmentId,
    ) -> impl std::future::Future<Output = Result<Option<Ticket>>> + Send;
}
