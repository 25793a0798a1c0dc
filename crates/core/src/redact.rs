//! Token redaction for log output.

/// Placeholder substituted for token material in logs and traces.
pub const REDACTED: &str = "[REDACTED]";

/// Replace every occurrence of `token` in `text` with [`REDACTED`].
///
/// Must be applied to any message that could carry a raw token before it is
/// handed to a log sink. An empty token is left alone (replacing the empty
/// string would corrupt the message).
pub fn redact(text: &str, token: &str) -> String {
    if token.is_empty() {
        return text.to_string();
    }
    text.replace(token, REDACTED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_every_occurrence() {
        let token = "eyJhbGciOiJIUzI1NiJ9.payload.sig";
        let text = format!("sent {token}, got 401 for {token}");
        let redacted = redact(&text, token);

        assert!(!redacted.contains(token));
        assert_eq!(redacted.matches(REDACTED).count(), 2);
    }

    #[test]
    fn empty_token_is_a_no_op() {
        assert_eq!(redact("plain message", ""), "plain message");
    }
}
