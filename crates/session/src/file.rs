//! Durable session store backed by a single JSON file.
//!
//! The whole record (token, username, role) lives in one document, so the
//! no-partial-write invariant is structural: the file either holds a complete
//! session or does not exist. Writes go through a temp file and a rename.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::store::{Session, SessionStore, StoreError};

/// File-backed store under the per-profile data directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at the default location (`<data_dir>/shelfside/session.json`).
    pub fn new() -> anyhow::Result<Self> {
        let base = dirs::data_dir()
            .context("failed to determine data directory - ensure a home directory is accessible")?;
        Ok(Self::at_path(base.join("shelfside").join("session.json")))
    }

    /// Store at an explicit path (tests, alternate profiles).
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, session: Session) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let json = serde_json::to_vec_pretty(&session)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        // Write-then-rename keeps the visible file whole at every instant.
        let tmp = self.tmp_path();
        let mut file = fs::File::create(&tmp).map_err(|e| StoreError::Io(e.to_string()))?;
        file.write_all(&json).map_err(|e| StoreError::Io(e.to_string()))?;
        file.sync_all().map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(())
    }

    fn read(&self) -> Result<Option<Session>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        match serde_json::from_slice(&bytes) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // Fail closed: a record we cannot parse is no session at all.
                tracing::warn!(error = %e, "discarding unreadable session record");
                let _ = fs::remove_file(&self.path);
                Ok(None)
            }
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            // Already empty; clearing twice is a no-op.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }
}
