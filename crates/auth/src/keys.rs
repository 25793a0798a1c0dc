//! Signing-key rotation tracking.
//!
//! The backend rotates its token-signing key periodically; tokens signed by
//! the immediately prior key stay acceptable for a bounded grace period. The
//! client only consumes key identifiers — it never holds key material.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default grace period during which the previous key id stays acceptable.
pub fn default_rotation_grace() -> Duration {
    Duration::days(7)
}

/// Which signing-key identifiers are currently acceptable.
///
/// Updated opportunistically from whatever channel the key distribution
/// service uses (response headers, claims, or a periodic fetch); this client
/// only consumes the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRegistry {
    pub current_key_id: String,
    pub previous_key_id: Option<String>,
    pub rotation_window_start: DateTime<Utc>,
    pub rotation_window_end: DateTime<Utc>,
}

impl KeyRegistry {
    /// Registry for a deployment that has never rotated: no previous key,
    /// and a degenerate (already-closed) window.
    pub fn bootstrap(current_key_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            current_key_id: current_key_id.into(),
            previous_key_id: None,
            rotation_window_start: now,
            rotation_window_end: now,
        }
    }

    /// Is `key_id` acceptable at `now`?
    ///
    /// The current id is acceptable unconditionally; the previous id only
    /// strictly inside the rotation window.
    pub fn is_acceptable(&self, key_id: &str, now: DateTime<Utc>) -> bool {
        if key_id == self.current_key_id {
            return true;
        }
        match &self.previous_key_id {
            Some(previous) if key_id == previous => {
                self.rotation_window_start < now && now < self.rotation_window_end
            }
            _ => false,
        }
    }
}

/// Shared, updatable view of the key registry.
///
/// Consulted proactively when a token is decoded and reactively when the
/// backend signals a key-specific 401. Starts empty when the client has no
/// registry knowledge yet; with no registry every key id passes the proactive
/// check, since the backend's 401 remains the authority either way.
#[derive(Debug, Default)]
pub struct KeyRotationMonitor {
    registry: RwLock<Option<KeyRegistry>>,
}

impl KeyRotationMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: KeyRegistry) -> Self {
        Self {
            registry: RwLock::new(Some(registry)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<KeyRegistry>> {
        // A poisoned lock still holds a structurally valid registry.
        self.registry.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<KeyRegistry>> {
        self.registry.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn registry(&self) -> Option<KeyRegistry> {
        self.read().clone()
    }

    /// Is `key_id` acceptable at `now`? True when no registry is known yet.
    pub fn is_acceptable(&self, key_id: &str, now: DateTime<Utc>) -> bool {
        match self.read().as_ref() {
            Some(registry) => registry.is_acceptable(key_id, now),
            None => true,
        }
    }

    /// Install the full registry as published by the key distribution service.
    pub fn install(&self, registry: KeyRegistry) {
        *self.write() = Some(registry);
    }

    /// Record a rotation: the current id becomes the previous id and a fresh
    /// grace window opens for it, starting at `now`.
    pub fn update_registry(&self, new_current_key_id: impl Into<String>, now: DateTime<Utc>) {
        self.update_registry_with_grace(new_current_key_id, now, default_rotation_grace());
    }

    pub fn update_registry_with_grace(
        &self,
        new_current_key_id: impl Into<String>,
        now: DateTime<Utc>,
        grace: Duration,
    ) {
        let new_current = new_current_key_id.into();
        let mut guard = self.write();
        let next = match guard.take() {
            Some(old) => KeyRegistry {
                previous_key_id: Some(old.current_key_id),
                current_key_id: new_current,
                rotation_window_start: now,
                rotation_window_end: now + grace,
            },
            None => KeyRegistry::bootstrap(new_current, now),
        };
        tracing::info!(current = %next.current_key_id, "signing-key registry updated");
        *guard = Some(next);
    }

    /// Telemetry hook for the response guard: the backend rejected a token
    /// over its key id. Distinguishes an expired-grace previous key from a
    /// key this client has never heard of; the caller's action is identical
    /// in both cases (clear the session, force re-login).
    pub fn note_rejected_key(&self, key_id: &str, now: DateTime<Utc>) {
        match self.read().as_ref() {
            Some(registry) if registry.previous_key_id.as_deref() == Some(key_id) => {
                tracing::warn!(
                    window_closed = %(now >= registry.rotation_window_end),
                    "backend rejected token signed with the previous key id"
                );
            }
            Some(_) => {
                tracing::warn!("backend rejected token signed with an unknown key id");
            }
            None => {
                tracing::warn!("backend rejected a key id before any registry was known");
            }
        }
    }
}
