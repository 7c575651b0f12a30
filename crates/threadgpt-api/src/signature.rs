//! Slack request signature verification.
//!
//! Slack signs each webhook with HMAC-SHA256 over `v0:{timestamp}:{body}`
//! and sends the result as `v0={hex digest}` in `X-Slack-Signature`.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_VERSION: &str = "v0";

/// Requests older (or newer) than this are rejected as replays.
const MAX_TIMESTAMP_SKEW_SECS: i64 = 300;

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("Missing signature headers")]
    MissingHeaders,

    #[error("Invalid request timestamp")]
    InvalidTimestamp,

    #[error("Request timestamp outside tolerance")]
    StaleTimestamp,

    #[error("Signature mismatch")]
    Mismatch,
}

/// Compute the expected signature for a request.
pub fn compute_signature(secret: &str, timestamp: &str, body: &str) -> String {
    let base = format!("{}:{}:{}", SIGNATURE_VERSION, timestamp, body);
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(base.as_bytes());
    format!(
        "{}={}",
        SIGNATURE_VERSION,
        hex::encode(mac.finalize().into_bytes())
    )
}

/// Verify a request signature against the signing secret.
///
/// Comparison is constant-time; the timestamp must be within
/// [`MAX_TIMESTAMP_SKEW_SECS`] of the current clock.
pub fn verify(
    secret: &str,
    timestamp: &str,
    body: &str,
    provided: &str,
) -> Result<(), SignatureError> {
    let ts: i64 = timestamp
        .parse()
        .map_err(|_| SignatureError::InvalidTimestamp)?;

    let now = chrono::Utc::now().timestamp();
    if (now - ts).abs() > MAX_TIMESTAMP_SKEW_SECS {
        return Err(SignatureError::StaleTimestamp);
    }

    let expected = compute_signature(secret, timestamp, body);
    if expected.as_bytes().ct_eq(provided.as_bytes()).into() {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "8f742231b10e8888abcd99yyyzzz85a5";
    const BODY: &str = "token=xyzz&team_id=T1&command=%2Fchatgpt&text=C1%2Fp1111111111000001";

    fn now_ts() -> String {
        chrono::Utc::now().timestamp().to_string()
    }

    #[test]
    fn test_signature_format() {
        let sig = compute_signature(SECRET, "1531420618", BODY);
        assert!(sig.starts_with("v0="));
        // 32-byte digest, hex encoded
        assert_eq!(sig.len(), 3 + 64);
        assert!(sig[3..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signature_is_deterministic() {
        let a = compute_signature(SECRET, "1531420618", BODY);
        let b = compute_signature(SECRET, "1531420618", BODY);
        assert_eq!(a, b);
    }

    #[test]
    fn test_verify_accepts_computed_signature() {
        let ts = now_ts();
        let sig = compute_signature(SECRET, &ts, BODY);
        assert!(verify(SECRET, &ts, BODY, &sig).is_ok());
    }

    #[test]
    fn test_verify_rejects_mutated_body() {
        let ts = now_ts();
        let sig = compute_signature(SECRET, &ts, BODY);

        let mut mutated = BODY.to_string();
        mutated.replace_range(0..1, "u");
        assert!(matches!(
            verify(SECRET, &ts, &mutated, &sig),
            Err(SignatureError::Mismatch)
        ));
    }

    #[test]
    fn test_verify_rejects_mutated_timestamp() {
        let ts = now_ts();
        let sig = compute_signature(SECRET, &ts, BODY);

        let mut other = ts.clone();
        let last = other.pop().unwrap();
        other.push(if last == '0' { '1' } else { '0' });
        assert!(matches!(
            verify(SECRET, &other, BODY, &sig),
            Err(SignatureError::Mismatch)
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let ts = now_ts();
        let sig = compute_signature("other-secret", &ts, BODY);
        assert!(matches!(
            verify(SECRET, &ts, BODY, &sig),
            Err(SignatureError::Mismatch)
        ));
    }

    #[test]
    fn test_verify_rejects_stale_timestamp() {
        let stale = (chrono::Utc::now().timestamp() - 3600).to_string();
        let sig = compute_signature(SECRET, &stale, BODY);
        assert!(matches!(
            verify(SECRET, &stale, BODY, &sig),
            Err(SignatureError::StaleTimestamp)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage_timestamp() {
        assert!(matches!(
            verify(SECRET, "not-a-number", BODY, "v0=00"),
            Err(SignatureError::InvalidTimestamp)
        ));
    }
}
