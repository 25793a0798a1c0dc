//! In-memory session store (tests, and profiles with persistence disabled).

use std::sync::Mutex;

use crate::store::{Session, SessionStore, StoreError};

/// Mutex-held single-slot store. The lock makes every save/read/clear an
/// atomic full-record operation.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        // A poisoned lock still holds a whole record or nothing.
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: Session) -> Result<(), StoreError> {
        *self.lock() = Some(session);
        Ok(())
    }

    fn read(&self) -> Result<Option<Session>, StoreError> {
        Ok(self.lock().clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfside_auth::Role;

    #[test]
    fn save_then_read_round_trips() {
        let store = MemorySessionStore::new();
        let session = Session::new("tok.en.sig", "alice", Role::User);

        store.save(session.clone()).unwrap();
        assert_eq!(store.read().unwrap(), Some(session));
    }

    #[test]
    fn save_replaces_wholesale() {
        let store = MemorySessionStore::new();
        store.save(Session::new("t1.p.s", "alice", Role::User)).unwrap();
        store.save(Session::new("t2.p.s", "bob", Role::Admin)).unwrap();

        let current = store.read().unwrap().unwrap();
        assert_eq!(current.username, "bob");
        assert_eq!(current.role, Role::Admin);
        assert_eq!(current.token, "t2.p.s");
    }

    #[test]
    fn clear_is_idempotent() {
        let store = MemorySessionStore::new();
        store.save(Session::new("t.p.s", "alice", Role::User)).unwrap();

        store.clear().unwrap();
        assert_eq!(store.read().unwrap(), None);
        // Second clear on the already-empty store must not error.
        store.clear().unwrap();
        assert_eq!(store.read().unwrap(), None);
    }
}
