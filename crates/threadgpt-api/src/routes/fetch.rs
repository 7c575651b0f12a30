//! The `/fetch-thread` slash command: echo a thread's content back into the
//! channel without involving the completion API.

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use std::sync::Arc;

use threadgpt_slack::{parse_thread_link, ThreadMessage};

use crate::error::ApiResult;
use crate::respond::SlackResponse;
use crate::routes::{authenticate, SlackCommandPayload};
use crate::state::AppState;

const USAGE_HINT: &str = "Please provide a thread link. Usage: `/fetch-thread <thread_link>`";
const INVALID_LINK: &str =
    "Invalid thread link format. Please provide a valid Slack thread link.";
const EMPTY_THREAD: &str = "No messages found in this thread.";

/// Keep rendered output under Slack's message limit (4000 chars, with margin).
const RENDER_BUDGET: usize = 3500;

pub async fn fetch_thread(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<SlackResponse>> {
    let payload = authenticate(&state, &headers, &body)?;

    tracing::info!(user = %payload.user_id, "Received fetch-thread command");

    tokio::spawn(run_fetch(state, payload));

    Ok(Json(SlackResponse::in_channel("Fetching thread content...")))
}

async fn run_fetch(state: Arc<AppState>, payload: SlackCommandPayload) {
    let message = match process_fetch(&state, &payload).await {
        Ok(message) => message,
        Err(error) => {
            tracing::error!(error = %format!("{:#}", error), "Thread fetch failed");
            SlackResponse::ephemeral(format!("Error fetching thread messages: {}", error))
        }
    };

    if let Err(error) = state.responder.deliver(&payload.response_url, &message).await {
        tracing::error!(error = %error, "Failed to deliver deferred response");
    }
}

async fn process_fetch(
    state: &AppState,
    payload: &SlackCommandPayload,
) -> anyhow::Result<SlackResponse> {
    let thread_link = payload.text.trim();

    if thread_link.is_empty() {
        return Ok(SlackResponse::ephemeral(USAGE_HINT));
    }

    let Some(reference) = parse_thread_link(thread_link) else {
        return Ok(SlackResponse::ephemeral(INVALID_LINK));
    };

    let messages = state
        .slack
        .thread_messages(&reference.channel_id, &reference.thread_ts)
        .await?;

    if messages.is_empty() {
        return Ok(SlackResponse::ephemeral(EMPTY_THREAD));
    }

    Ok(SlackResponse::in_channel(render_messages(&messages)))
}

fn render_messages(messages: &[ThreadMessage]) -> String {
    let mut formatted = format!("*Found {} messages in thread:*\n\n", messages.len());

    for message in messages {
        let name = message.username.as_deref().unwrap_or(&message.user);
        formatted.push_str(&format!("*{}:* {}\n\n", name, message.text));

        if formatted.len() > RENDER_BUDGET {
            formatted.push_str("... (message truncated due to length)");
            break;
        }
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(user: &str, text: &str) -> ThreadMessage {
        ThreadMessage {
            user: user.to_string(),
            text: text.to_string(),
            ts: "1111111111.000001".to_string(),
            username: None,
        }
    }

    #[test]
    fn test_render_includes_count_and_authors() {
        let rendered = render_messages(&[message("U1", "hi"), message("U2", "yo")]);
        assert!(rendered.starts_with("*Found 2 messages in thread:*"));
        assert!(rendered.contains("*U1:* hi"));
        assert!(rendered.contains("*U2:* yo"));
        assert!(!rendered.contains("truncated"));
    }

    #[test]
    fn test_render_truncates_long_threads() {
        let long_text = "x".repeat(500);
        let messages: Vec<ThreadMessage> =
            (0..20).map(|_| message("U1", &long_text)).collect();

        let rendered = render_messages(&messages);
        assert!(rendered.ends_with("... (message truncated due to length)"));
        assert!(rendered.len() < 4100);
    }
}
