//! `shelfside-auth` — pure authentication primitives (fail-closed).
//!
//! Token decoding, role extraction, signing-key acceptability, and route
//! gating. No IO, no clock reads (callers pass `now` explicitly), and no
//! cryptographic verification: the client trusts the transport channel and
//! the backend's 401 enforcement for authenticity.

pub mod codec;
pub mod keys;
pub mod roles;
pub mod routes;

pub use codec::{TokenDecodeError, TokenPayload, decode, extract_role};
pub use keys::{KeyRegistry, KeyRotationMonitor};
pub use roles::Role;
pub use routes::{Access, Route, RouteGuard};
