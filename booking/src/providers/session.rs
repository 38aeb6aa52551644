//! Session lookup.
//!
//! Bearer tokens are only honored while a session row exists for them, so a
//! signed token can be revoked by deleting its session.

use hotel_booking_core::{Result, UserId};
use serde::{Deserialize, Serialize};

/// A login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session id.
    pub id: i32,

    /// Owner of the session.
    pub user_id: UserId,

    /// Bearer token issued at login.
    pub token: String,
}

/// Session store.
pub trait SessionStore: Send + Sync {
    /// Find the session for a bearer token.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: the token belongs to a live session
    /// - `Ok(None)`: no session for this token
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Storage` if the lookup fails.
    fn find_session(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Option<Session>>> + Send;
}
