//! Mock enrollment provider for testing.

use super::poisoned;
use crate::providers::EnrollmentProvider;
use hotel_booking_core::{Enrollment, EnrollmentId, Result, Ticket, UserId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Records {
    enrollments: HashMap<UserId, Enrollment>,
    tickets: HashMap<EnrollmentId, Ticket>,
}

/// Mock enrollment provider.
///
/// Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MockEnrollmentProvider {
    records: Arc<Mutex<Records>>,
}

impl MockEnrollmentProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite an enrollment.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the mock's lock is poisoned.
    pub fn insert_enrollment(&self, enrollment: Enrollment) -> Result<()> {
        self.records
            .lock()
            .map_err(poisoned)?
            .enrollments
            .insert(enrollment.user_id, enrollment);
        Ok(())
    }

    /// Add or overwrite the ticket of `ticket.enrollment_id`.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the mock's lock is poisoned.
    pub fn insert_ticket(&self, ticket: Ticket) -> Result<()> {
        self.records
            .lock()
            .map_err(poisoned)?
            .tickets
            .insert(ticket.enrollment_id, ticket);
        Ok(())
    }
}

impl EnrollmentProvider for MockEnrollmentProvider {
    async fn find_enrollment(&self, user_id: UserId) -> Result<Option<Enrollment>> {
        let records = self.records.lock().map_err(poisoned)?;
        Ok(records.enrollments.get(&user_id).copied())
    }

    async fn find_ticket(&self, enrollment_id: EnrollmentId) -> Result<Option<Ticket>> {
        let records = self.records.lock().map_err(poisoned)?;
        Ok(records.tickets.get(&enrollment_id).copied())
    }
}
