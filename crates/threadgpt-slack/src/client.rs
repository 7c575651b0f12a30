// Slack Web API client (HTTP direct, no SDK)

use crate::error::{Result, SlackError};
use crate::types::ThreadMessage;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;

const SLACK_API_BASE: &str = "https://slack.com/api";

/// Sentinel author for messages without a `user` field (e.g. some webhook posts).
pub const UNKNOWN_USER: &str = "unknown";

pub struct SlackClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl SlackClient {
    /// Create new client with a bot token
    pub fn new(bot_token: impl Into<String>) -> Result<Self> {
        let bot_token = bot_token.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", bot_token))
                .map_err(|_| SlackError::InvalidToken)?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url: SLACK_API_BASE.to_string(),
        })
    }

    /// Override the API base URL (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the root message plus all replies of a thread, in the order
    /// Slack returns them (chronological).
    ///
    /// An empty thread yields an empty Vec. No pagination is attempted
    /// beyond the single `conversations.replies` call.
    pub async fn thread_messages(
        &self,
        channel_id: &str,
        thread_ts: &str,
    ) -> Result<Vec<ThreadMessage>> {
        tracing::debug!(channel = %channel_id, ts = %thread_ts, "Fetching thread messages");

        let response = self
            .http_client
            .get(format!("{}/conversations.replies", self.base_url))
            .query(&[("channel", channel_id), ("ts", thread_ts)])
            .send()
            .await?;

        let raw: RepliesResponse = response.json().await?;

        if !raw.ok {
            return Err(SlackError::Api(
                raw.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }

        let messages = raw.messages.unwrap_or_default();
        tracing::debug!(count = messages.len(), "Fetched thread messages");

        Ok(messages.into_iter().map(normalize_message).collect())
    }
}

/// Normalize a raw Slack message record at the ingestion boundary.
fn normalize_message(raw: RawMessage) -> ThreadMessage {
    ThreadMessage {
        user: raw.user.unwrap_or_else(|| UNKNOWN_USER.to_string()),
        text: raw.text.unwrap_or_default(),
        ts: raw.ts.unwrap_or_default(),
        username: raw.username,
    }
}

// ============================================================================
// SLACK API RESPONSE TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
struct RepliesResponse {
    ok: bool,
    messages: Option<Vec<RawMessage>>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    user: Option<String>,
    text: Option<String>,
    ts: Option<String>,
    username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_fills_defaults() {
        let msg = normalize_message(RawMessage {
            user: None,
            text: None,
            ts: Some("1234567890.000100".to_string()),
            username: None,
        });
        assert_eq!(msg.user, "unknown");
        assert_eq!(msg.text, "");
        assert_eq!(msg.ts, "1234567890.000100");
        assert!(msg.username.is_none());
    }

    #[test]
    fn test_normalize_keeps_bot_username() {
        let msg = normalize_message(RawMessage {
            user: Some("U1".to_string()),
            text: Some("hi".to_string()),
            ts: Some("1.0".to_string()),
            username: Some("deploy-bot".to_string()),
        });
        assert_eq!(msg.username.as_deref(), Some("deploy-bot"));
    }

    #[test]
    fn test_error_payload_deserializes() {
        let raw: RepliesResponse =
            serde_json::from_str(r#"{"ok":false,"error":"channel_not_found"}"#).unwrap();
        assert!(!raw.ok);
        assert_eq!(raw.error.as_deref(), Some("channel_not_found"));
    }
}
