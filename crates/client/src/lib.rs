//! `shelfside-client` — login flow and authorized HTTP pipeline.
//!
//! [`CredentialSubmitter`] turns a login request/response cycle into a
//! populated session store or a surfaced login error; [`ApiClient`] attaches
//! the stored token to every outbound call and invalidates the session on any
//! 401 coming back.

pub mod http;
pub mod login;
pub mod wire;

pub use http::{ApiClient, ApiError};
pub use login::{Credentials, CredentialSubmitter, SubmitState};
