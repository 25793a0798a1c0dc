//! Login submission flow.

use std::sync::Arc;

use chrono::Utc;
use reqwest::StatusCode;

use shelfside_auth::{KeyRotationMonitor, codec};
use shelfside_core::{LoginError, SessionError, redact};
use shelfside_session::{Session, SessionStore};

use crate::wire::{LoginRequest, LoginResponse};

/// Ephemeral login input. Never persisted, never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

// Manual Debug so credentials can never leak a password into logs.
impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<hidden>")
            .finish()
    }
}

/// Where a submission currently stands.
///
/// `Failed` is terminal for the attempt; nothing is retried automatically
/// and a new submission requires fresh user input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Authenticated,
    Failed(LoginError),
}

/// Orchestrates the login request/response cycle.
///
/// On success the session store is populated wholesale (role derived only
/// from the decoded token); on any failure the store is left untouched.
pub struct CredentialSubmitter {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    monitor: Arc<KeyRotationMonitor>,
    state: SubmitState,
}

impl CredentialSubmitter {
    pub fn new(
        base_url: impl Into<String>,
        store: Arc<dyn SessionStore>,
        monitor: Arc<KeyRotationMonitor>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            store,
            monitor,
            state: SubmitState::Idle,
        }
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    /// Submit credentials and, on success, populate the session store.
    pub async fn submit(&mut self, credentials: &Credentials) -> Result<Session, LoginError> {
        if !credentials.is_complete() {
            let err = LoginError::EmptyFields;
            self.state = SubmitState::Failed(err.clone());
            return Err(err);
        }

        self.state = SubmitState::Submitting;
        let result = self.perform(credentials).await;

        match &result {
            Ok(session) => {
                tracing::info!(username = %session.username, role = %session.role, "login succeeded");
                self.state = SubmitState::Authenticated;
            }
            Err(err) => {
                tracing::warn!(error = %err, "login failed");
                self.state = SubmitState::Failed(err.clone());
            }
        }

        result
    }

    async fn perform(&self, credentials: &Credentials) -> Result<Session, LoginError> {
        let url = format!("{}/api/auth/login", self.base_url);
        let body = LoginRequest {
            username: &credentials.username,
            password: &credentials.password,
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LoginError::network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(LoginError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(LoginError::Unexpected(status.as_u16()));
        }

        let envelope: LoginResponse = response
            .json()
            .await
            .map_err(|_| LoginError::Unexpected(status.as_u16()))?;

        let token = match envelope.data {
            Some(token) if envelope.success && !token.is_empty() => token,
            _ => return Err(LoginError::Unexpected(status.as_u16())),
        };

        let payload = codec::decode(&token).map_err(|e| {
            tracing::debug!(error = %e, "issued token failed to decode");
            SessionError::MalformedToken(e.to_string())
        })?;

        // Proactive key check; the backend's 401 remains the authority.
        if let Some(kid) = payload.kid.as_deref() {
            if !self.monitor.is_acceptable(kid, Utc::now()) {
                return Err(SessionError::KeyMismatch {
                    key_id: kid.to_string(),
                }
                .into());
            }
        }

        let role = codec::extract_role(&payload);
        let session = Session::new(token, credentials.username.clone(), role);

        self.store
            .save(session.clone())
            .map_err(|e| LoginError::Store(redact(&e.to_string(), &session.token)))?;

        Ok(session)
    }
}
