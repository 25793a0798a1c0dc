//! JWT payload decoding (no signature verification).
//!
//! The client never verifies a signature; it decodes the payload segment and
//! trusts HTTPS plus the backend's 401 enforcement for authenticity. Anything
//! that does not parse cleanly fails the decode, which downstream treats as
//! "no session" rather than a half-initialized one.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Role;

/// Decoded (unverified) JWT payload. Transient; exists only during decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Subject (the authenticated username).
    #[serde(default)]
    pub sub: Option<String>,

    /// Raw role claim; mapped through [`Role::from_claim`].
    #[serde(default)]
    pub role: Option<String>,

    /// Identifier of the signing key the backend used.
    #[serde(default)]
    pub kid: Option<String>,

    /// Issued-at, seconds since the epoch.
    #[serde(default)]
    pub iat: Option<i64>,

    /// Expiry, seconds since the epoch. Decoded but never acted on; expiry
    /// is discovered reactively via 401.
    #[serde(default)]
    pub exp: Option<i64>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenDecodeError {
    #[error("token must have exactly three dot-separated segments")]
    SegmentCount,

    #[error("payload segment is not valid base64url")]
    Base64,

    #[error("payload segment is not valid JSON")]
    Json,
}

/// Decode the payload segment of a compact JWT.
///
/// Pure function over its input; performs no verification and no IO.
pub fn decode(token: &str) -> Result<TokenPayload, TokenDecodeError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenDecodeError::SegmentCount);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenDecodeError::Base64)?;

    serde_json::from_slice(&bytes).map_err(|_| TokenDecodeError::Json)
}

/// Extract the role from a decoded payload, failing closed to `Guest`.
///
/// A missing or unrecognized role claim is not a hard failure; the resulting
/// guest session simply cannot reach any protected route.
pub fn extract_role(payload: &TokenPayload) -> Role {
    let role = Role::from_claim(payload.role.as_deref());
    if role == Role::Guest && payload.role.is_some() {
        tracing::warn!(claim = %payload.role.as_deref().unwrap_or_default(),
            "unrecognized role claim, treating subject as guest");
    }
    role
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn encode_token(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.fakesignature")
    }

    #[test]
    fn decodes_role_and_kid_claims() {
        let token = encode_token(&serde_json::json!({
            "sub": "admin",
            "role": "ROLE_ADMIN",
            "kid": "key_prod_002",
            "iat": 1_700_000_000,
        }));

        let payload = decode(&token).unwrap();
        assert_eq!(payload.sub.as_deref(), Some("admin"));
        assert_eq!(payload.kid.as_deref(), Some("key_prod_002"));
        assert_eq!(extract_role(&payload), Role::Admin);
    }

    #[test]
    fn missing_role_claim_is_guest() {
        let token = encode_token(&serde_json::json!({"sub": "nobody"}));
        let payload = decode(&token).unwrap();
        assert_eq!(extract_role(&payload), Role::Guest);
    }

    #[test]
    fn wrong_segment_count_is_rejected() {
        assert_eq!(decode("onlyonesegment"), Err(TokenDecodeError::SegmentCount));
        assert_eq!(decode("two.segments"), Err(TokenDecodeError::SegmentCount));
        assert_eq!(decode("a.b.c.d"), Err(TokenDecodeError::SegmentCount));
        assert_eq!(decode(""), Err(TokenDecodeError::SegmentCount));
    }

    #[test]
    fn non_base64_payload_is_rejected() {
        assert_eq!(decode("head.!!not-base64!!.sig"), Err(TokenDecodeError::Base64));
    }

    #[test]
    fn non_json_payload_is_rejected() {
        let garbage = URL_SAFE_NO_PAD.encode(b"this is not json");
        let token = format!("head.{garbage}.sig");
        assert_eq!(decode(&token), Err(TokenDecodeError::Json));
    }

    proptest! {
        /// Decoding never panics, and every successful decode yields a role
        /// from the closed set.
        #[test]
        fn decode_is_total(input in "\\PC*") {
            if let Ok(payload) = decode(&input) {
                let role = extract_role(&payload);
                prop_assert!(matches!(role, Role::Guest | Role::User | Role::Admin));
            }
        }
    }
}
