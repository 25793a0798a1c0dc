//! Client-side error model.

use thiserror::Error;

/// Failure of an established session, discovered while using it.
///
/// Every sub-kind terminates the same way (full session clear plus forced
/// re-login); the sub-kind exists for logging/telemetry only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The token the backend issued could not be decoded.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// The token was signed with a key id that is no longer acceptable.
    #[error("token signed with unacceptable key id '{key_id}'")]
    KeyMismatch { key_id: String },

    /// The backend rejected the session (401), reason unspecified.
    ///
    /// Expiry is only ever discovered this way; the client performs no
    /// proactive expiry check and has no refresh protocol.
    #[error("session rejected by the backend")]
    Expired,
}

/// Failure of a single login submission.
///
/// Local to the attempt; a failed submission is never retried automatically
/// and requires a fresh user-initiated submit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// Username or password was empty; detected before any network call.
    #[error("username and password must not be empty")]
    EmptyFields,

    /// The backend answered 401 to the login request.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The login request never completed (connect failure, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// Any other non-2xx response from the login endpoint.
    #[error("unexpected response from login endpoint (status {0})")]
    Unexpected(u16),

    /// The session record could not be persisted after a successful login.
    #[error("failed to persist session: {0}")]
    Store(String),

    /// A session-level failure surfaced during login (e.g. the issued token
    /// was malformed, or its key id was rejected proactively).
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl LoginError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Message safe to show to a user.
    ///
    /// Never contains raw backend error text, stack detail, or token
    /// material; the originals belong in server-side logs only.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyFields => "Please enter a username and password.",
            Self::InvalidCredentials => "Invalid username or password.",
            Self::Network(_) => "Could not reach the server. Check your connection and try again.",
            Self::Unexpected(_) | Self::Store(_) | Self::Session(_) => {
                "Something went wrong while signing in. Please try again."
            }
        }
    }
}
