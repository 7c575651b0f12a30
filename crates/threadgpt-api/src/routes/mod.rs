pub mod command;
pub mod fetch;
pub mod health;

use axum::body::Bytes;
use axum::http::HeaderMap;
use serde::Deserialize;

use crate::error::ApiError;
use crate::signature::{self, SignatureError};
use crate::state::AppState;

/// Slash-command payload, form-encoded by Slack.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackCommandPayload {
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub text: String,
    pub response_url: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub channel_id: String,
}

/// Verify the request signature and decode the slash-command payload.
///
/// Verification runs over the raw body before any parsing; a missing signing
/// secret is a configuration fault, not a 401.
pub fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<SlackCommandPayload, ApiError> {
    let secret = &state.config.slack_signing_secret;
    if secret.is_empty() {
        return Err(ApiError::Config(
            "SLACK_SIGNING_SECRET is not set".to_string(),
        ));
    }

    let timestamp = header_str(headers, "x-slack-request-timestamp")?;
    let provided = header_str(headers, "x-slack-signature")?;
    let raw_body = std::str::from_utf8(body)
        .map_err(|_| ApiError::BadRequest("Request body is not valid UTF-8".to_string()))?;

    signature::verify(secret, timestamp, raw_body, provided)?;

    serde_urlencoded::from_bytes(body)
        .map_err(|e| ApiError::BadRequest(format!("Malformed command payload: {}", e)))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, ApiError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::Unauthorized(SignatureError::MissingHeaders))
}
