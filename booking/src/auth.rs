//! Bearer-token authentication.
//!
//! A request is authenticated when:
//!
//! 1. it carries `Authorization: Bearer <token>`
//! 2. the token is an HS256 JWT signed with the configured secret, with
//!    claims `{ "userId": <int> }`
//! 3. a session row exists for the exact token
//!
//! Any failure is a 401. Tokens carry no expiry; revoking a session is
//! deleting its row.

use crate::providers::{BookingStore, EnrollmentProvider, RoomCatalog, SessionStore};
use crate::router::BookingApiState;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use hotel_booking_core::UserId;
use hotel_booking_web::AppError;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Authentication failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header.
    #[error("Missing Authorization header")]
    MissingHeader,

    /// Header present but not `Bearer <token>`.
    #[error("Invalid Authorization header format")]
    InvalidHeaderFormat,

    /// Signature, algorithm or claims rejected.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token verified but no session exists for it.
    #[error("No session for token")]
    SessionNotFound,

    /// Session lookup failed.
    #[error("Session lookup failed: {0}")]
    Storage(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Storage(_) => Self::internal("Session lookup failed")
                .with_source(anyhow::Error::new(err)),
            _ => Self::unauthorized(err.to_string()),
        }
    }
}

/// JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Authenticated user.
    pub user_id: UserId,

    /// Issued-at (Unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Signs and verifies session tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for HS256 tokens signed with `secret`.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verify `token` and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token is malformed, signed
    /// with another key or algorithm, or lacks `userId`.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token verification failed");
                AuthError::InvalidToken(e.to_string())
            })
    }

    /// Sign a token for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if encoding fails.
    pub fn issue(&self, user_id: UserId, issued_at: i64) -> Result<String, AuthError> {
        let claims = Claims {
            user_id,
            iat: Some(issued_at),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

/// Resolve a bearer token to the user it authenticates.
///
/// # Errors
///
/// - `InvalidToken`: verification failed
/// - `SessionNotFound`: no session for the token
/// - `Storage`: the session lookup failed
pub async fn authenticate<S: SessionStore>(
    verifier: &TokenVerifier,
    sessions: &S,
    token: &str,
) -> Result<UserId, AuthError> {
    let claims = verifier.verify(token)?;

    sessions
        .find_session(token)
        .await
        .map_err(|e| AuthError::Storage(e.to_string()))?
        .ok_or(AuthError::SessionNotFound)?;

    Ok(claims.user_id)
}

/// Extract the token from an `Authorization` header value.
///
/// # Errors
///
/// Returns `AuthError::InvalidHeaderFormat` unless the value is
/// `Bearer <non-empty token>`.
pub fn parse_bearer(header: &str) -> Result<&str, AuthError> {
    match header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::InvalidHeaderFormat),
    }
}

/// Raw bearer token from the `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

#[async_trait]
impl<St> FromRequestParts<St> for BearerToken
where
    St: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidHeaderFormat)?;

        Ok(Self(parse_bearer(header)?.to_string()))
    }
}

/// The user a request is authenticated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

#[async_trait]
impl<E, R, B, S> FromRequestParts<Arc<BookingApiState<E, R, B, S>>> for AuthenticatedUser
where
    E: EnrollmentProvider + 'static,
    R: RoomCatalog + 'static,
    B: BookingStore + 'static,
    S: SessionStore + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<BookingApiState<E, R, B, S>>,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
        let user_id = authenticate(&state.verifier, &state.sessions, &token).await?;
        Ok(Self(user_id))
    }
}
