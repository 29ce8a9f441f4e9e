use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::consts;

mod firebase;
mod memory;

pub use firebase::FirebaseAuth;
pub use memory::MemoryAuth;

/// How long the session check may take before the caller proceeds as
/// unauthenticated.
pub const SESSION_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// A freshly established session with the auth collaborator.
#[derive(Debug, Clone)]
pub struct Session {
    pub uid: String,
    pub email: String,
    pub id_token: String,
}

/// The identity behind a presented token.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub uid: String,
    pub email: String,
}

/// Coded failures from the auth collaborator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    #[error("user-not-found")]
    UserNotFound,
    #[error("wrong-password")]
    WrongPassword,
    #[error("email-already-in-use")]
    EmailAlreadyInUse,
    #[error("weak-password")]
    WeakPassword,
    #[error("invalid-email")]
    InvalidEmail,
    #[error("network-request-failed")]
    NetworkRequestFailed,
    #[error("{0}")]
    Other(String),
}

impl AuthError {
    /// Collaborator error codes, normalized. The collaborator suffixes some
    /// codes with detail (`WEAK_PASSWORD : ...`), hence the prefix match.
    /// Unknown codes pass through as [`AuthError::Other`].
    pub fn from_code(code: &str) -> Self {
        match code {
            c if c.starts_with("EMAIL_NOT_FOUND") => Self::UserNotFound,
            c if c.starts_with("INVALID_PASSWORD") => Self::WrongPassword,
            c if c.starts_with("INVALID_LOGIN_CREDENTIALS") => Self::WrongPassword,
            c if c.starts_with("EMAIL_EXISTS") => Self::EmailAlreadyInUse,
            c if c.starts_with("WEAK_PASSWORD") => Self::WeakPassword,
            c if c.starts_with("INVALID_EMAIL") => Self::InvalidEmail,
            c if c.starts_with("NETWORK_REQUEST_FAILED") => Self::NetworkRequestFailed,
            other => Self::Other(other.to_string()),
        }
    }

    /// The fixed human-readable message for each code.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UserNotFound | Self::WrongPassword => consts::INVALID_CREDENTIALS,
            Self::EmailAlreadyInUse => consts::EMAIL_ALREADY_REGISTERED,
            Self::WeakPassword => consts::PASSWORD_TOO_WEAK,
            Self::InvalidEmail => consts::INVALID_EMAIL_ADDRESS,
            Self::NetworkRequestFailed => consts::NETWORK_ERROR,
            Self::Other(_) => consts::AUTH_FAILED,
        }
    }
}

/// The authentication operations this application consumes. Injected so
/// tests substitute [`MemoryAuth`].
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn create_account(&self, email: &str, password: &str) -> Result<Session, AuthError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;
    /// Revokes the token where the collaborator supports it; otherwise the
    /// caller simply discards it.
    async fn sign_out(&self, token: &str) -> Result<(), AuthError>;
    /// Resolves the identity behind a token, `None` for a token the
    /// collaborator no longer recognizes.
    async fn current_session(&self, token: &str) -> Result<Option<SessionUser>, AuthError>;
    async fn change_password(&self, token: &str, new_password: &str) -> Result<(), AuthError>;
}

/// Session check with the fall-back-to-unauthenticated policy: a
/// collaborator that errors or does not answer within
/// [`SESSION_CHECK_TIMEOUT`] yields `None` instead of blocking the caller.
pub async fn resolve_session(auth: &dyn AuthProvider, token: &str) -> Option<SessionUser> {
    resolve_session_within(auth, token, SESSION_CHECK_TIMEOUT).await
}

async fn resolve_session_within(
    auth: &dyn AuthProvider,
    token: &str,
    timeout: Duration,
) -> Option<SessionUser> {
    match rocket::tokio::time::timeout(timeout, auth.current_session(token)).await {
        Ok(Ok(session)) => session,
        Ok(Err(e)) => {
            tracing::error!("session check failed: {e}");
            None
        }
        Err(_) => {
            tracing::warn!("session check timed out, proceeding as unauthenticated");
            None
        }
    }
}
