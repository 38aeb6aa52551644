//! Mock session store for testing.

use super::poisoned;
use crate::providers::{Session, SessionStore};
use hotel_booking_core::{Result, UserId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock session store.
///
/// Sessions are keyed by token; ids are assigned sequentially.
#[derive(Debug, Clone, Default)]
pub struct MockSessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl MockSessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for `user_id` under `token`.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the mock's lock is poisoned.
    pub fn insert(&self, user_id: UserId, token: impl Into<String>) -> Result<Session> {
        let mut sessions = self.sessions.lock().map_err(poisoned)?;
        let token = token.into();
        let session = Session {
            id: i32::try_from(sessions.len()).unwrap_or(i32::MAX).saturating_add(1),
            user_id,
            token: token.clone(),
        };
        sessions.insert(token, session.clone());
        Ok(session)
    }

    /// Close the session for `token`, if any.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the mock's lock is poisoned.
    pub fn remove(&self, token: &str) -> Result<()> {
        self.sessions.lock().map_err(poisoned)?.remove(token);
        Ok(())
    }
}

impl SessionStore for MockSessionStore {
    async fn find_session(&self, token: &str) -> Result<Option<Session>> {
        let sessions = self.sessions.lock().map_err(poisoned)?;
        Ok(sessions.get(token).cloned())
    }
}
