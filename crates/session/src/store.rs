//! Session record and store contract.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shelfside_auth::Role;

/// The sole persisted authentication record.
///
/// Token, username, and role exist together or not at all; a re-login
/// replaces the whole record, never patches it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub role: Role,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            role,
        }
    }
}

// Manual Debug so a session can never leak its token into logs.
impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("token", &shelfside_core::redact::REDACTED)
            .field("username", &self.username)
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("session store io failure: {0}")]
    Io(String),

    #[error("session record could not be serialized: {0}")]
    Serialize(String),
}

/// Durable, synchronous holder of at most one [`Session`].
///
/// Contract:
/// - `save` is an atomic full overwrite; a reader sees either the previous
///   record or the new one, never a mixture.
/// - `clear` is idempotent: clearing an already-empty store is a no-op and
///   never errors. Concurrent invalidations may call it back to back.
/// - No operation may leave a partial record behind.
pub trait SessionStore: Send + Sync {
    fn save(&self, session: Session) -> Result<(), StoreError>;
    fn read(&self) -> Result<Option<Session>, StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_the_token() {
        let session = Session::new("secret.token.sig", "alice", Role::User);
        let debug = format!("{session:?}");

        assert!(!debug.contains("secret.token.sig"));
        assert!(debug.contains("alice"));
    }
}
