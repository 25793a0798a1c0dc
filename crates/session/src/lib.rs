//! `shelfside-session` — the single source of truth for "is a user
//! authenticated".
//!
//! Every component that needs authentication state reads it from a
//! [`SessionStore`] rather than holding its own copy, so there is never a
//! divergent view of who is logged in.

pub mod file;
pub mod memory;
pub mod store;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
pub use store::{Session, SessionStore, StoreError};
