//! `shelfside-core` — shared error model and log hygiene helpers.
//!
//! This crate is intentionally decoupled from HTTP, storage, and token
//! handling; it only defines the failure vocabulary the rest of the client
//! speaks.

pub mod error;
pub mod redact;

pub use error::{LoginError, SessionError};
pub use redact::redact;
