//! Wire types for the auth endpoints.

use serde::{Deserialize, Serialize};

/// Structured reason the backend may attach to a key-specific 401.
pub const REASON_INVALID_KEY_ID: &str = "INVALID_KEY_ID";

/// Body of `POST /api/auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Successful login envelope: `data` carries the issued JWT.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<String>,
}

/// Optional structured body on a 401. Refines telemetry only; the client's
/// invalidation action is identical with or without it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthFailure {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub key_id: Option<String>,
}

impl AuthFailure {
    pub fn is_key_mismatch(&self) -> bool {
        self.reason.as_deref() == Some(REASON_INVALID_KEY_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_parses_with_and_without_token() {
        let full: LoginResponse =
            serde_json::from_str(r#"{"success":true,"message":"ok","data":"a.b.c"}"#).unwrap();
        assert!(full.success);
        assert_eq!(full.data.as_deref(), Some("a.b.c"));

        let bare: LoginResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!bare.success);
        assert_eq!(bare.data, None);
    }

    #[test]
    fn auth_failure_recognizes_key_mismatch() {
        let body: AuthFailure =
            serde_json::from_str(r#"{"reason":"INVALID_KEY_ID","key_id":"key_prod_999"}"#).unwrap();
        assert!(body.is_key_mismatch());
        assert_eq!(body.key_id.as_deref(), Some("key_prod_999"));

        let plain = AuthFailure::default();
        assert!(!plain.is_key_mismatch());
    }
}
