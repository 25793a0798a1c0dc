//! Authorized HTTP pipeline: bearer attachment and 401 handling.

use std::sync::Arc;

use chrono::Utc;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use shelfside_auth::KeyRotationMonitor;
use shelfside_core::SessionError;
use shelfside_session::SessionStore;

use crate::wire::AuthFailure;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The session was invalidated by this response (any 401).
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx, non-401 response.
    #[error("request failed with status {0}")]
    Status(u16),

    #[error("response body could not be decoded: {0}")]
    Decode(String),
}

/// Client for authorized API calls.
///
/// Outbound: reads the session store and attaches the token as a bearer
/// credential when present (absent, the request goes out unauthenticated and
/// the backend rejects it). Inbound: any 401, from any endpoint, clears the
/// store. Cheap to clone; clones share the store and monitor.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    monitor: Arc<KeyRotationMonitor>,
}

impl ApiClient {
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
        }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.send(self.http.get(&url)).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Explicit logout: same idempotent invalidation path as the guard.
    pub fn logout(&self) {
        self.invalidate();
        tracing::info!("logged out");
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = self.authorize(request);
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.guard(response).await
    }

    /// Request authorizer: pure read-and-decorate, no store side effects.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.store.read() {
            Ok(Some(session)) => request.bearer_auth(session.token),
            Ok(None) => request,
            Err(e) => {
                tracing::warn!(error = %e, "session store unreadable, sending unauthenticated");
                request
            }
        }
    }

    /// Response guard: a 401 from any endpoint invalidates the session.
    async fn guard(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            let failure: AuthFailure = response.json().await.unwrap_or_default();

            let error = if failure.is_key_mismatch() {
                let key_id = failure.key_id.unwrap_or_default();
                self.monitor.note_rejected_key(&key_id, Utc::now());
                SessionError::KeyMismatch { key_id }
            } else {
                SessionError::Expired
            };

            self.invalidate();
            // No key id or token material in this signal.
            tracing::warn!("session invalidated by a 401 response, re-login required");
            return Err(error.into());
        }

        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        Ok(response)
    }

    /// Idempotent session invalidation. Concurrent 401s may land here back to
    /// back; the second clear is a no-op and must never propagate a panic.
    fn invalidate(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear session store");
        }
    }
}
