//! Deferred delivery to Slack's `response_url`.
//!
//! The webhook acknowledges synchronously; everything the user actually sees
//! arrives through a single out-of-band POST built here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Broadcast to all channel participants
    InChannel,
    /// Visible only to the invoking user
    Ephemeral,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackResponse {
    pub response_type: ResponseType,
    pub text: String,
}

impl SlackResponse {
    pub fn in_channel(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::InChannel,
            text: text.into(),
        }
    }

    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Ephemeral,
            text: text.into(),
        }
    }
}

pub struct Responder {
    http_client: reqwest::Client,
}

impl Default for Responder {
    fn default() -> Self {
        Self::new()
    }
}

impl Responder {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
        }
    }

    /// POST a reply payload to the caller-supplied callback URL.
    pub async fn deliver(&self, response_url: &str, message: &SlackResponse) -> Result<()> {
        let response = self
            .http_client
            .post(response_url)
            .json(message)
            .send()
            .await
            .context("Failed to reach response_url")?;

        if !response.status().is_success() {
            anyhow::bail!("response_url returned status {}", response.status());
        }

        Ok(())
    }
}
