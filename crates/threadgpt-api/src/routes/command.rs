//! The `/chatgpt` slash command: resolve a thread link, relay the thread to
//! the completion API, and deliver the reply out-of-band.

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use std::sync::Arc;

use threadgpt_session::SessionStore;
use threadgpt_slack::{parse_thread_link, ThreadData};

use crate::error::ApiResult;
use crate::respond::SlackResponse;
use crate::routes::{authenticate, SlackCommandPayload};
use crate::state::AppState;

const USAGE_HINT: &str =
    "Please provide a thread link. Usage: `/chatgpt <thread_link> [chat_id]`";
const INVALID_LINK: &str =
    "Invalid thread link format. Please provide a valid Slack thread link.";
const EMPTY_THREAD: &str = "No messages found in this thread.";
const GENERIC_FAILURE: &str = "An error occurred while processing your request.";

/// Phase 1: verify, acknowledge, and detach the slow path.
pub async fn slack_command(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<SlackResponse>> {
    let payload = authenticate(&state, &headers, &body)?;

    tracing::info!(
        command = %payload.command,
        user = %payload.user_id,
        "Received slash command"
    );

    // Phase 2 runs detached; its only observable effect is exactly one POST
    // to the response_url.
    tokio::spawn(run_command(state, payload));

    Ok(Json(SlackResponse::in_channel("Processing your request...")))
}

/// Phase 2: do the real work and always deliver one callback message.
async fn run_command(state: Arc<AppState>, payload: SlackCommandPayload) {
    let message = match process_command(&state, &payload).await {
        Ok(message) => message,
        Err(error) => {
            tracing::error!(error = %format!("{:#}", error), "Slash command failed");
            SlackResponse::ephemeral(GENERIC_FAILURE)
        }
    };

    if let Err(error) = state.responder.deliver(&payload.response_url, &message).await {
        // Terminal failure mode: nothing left to escalate to.
        tracing::error!(error = %error, "Failed to deliver deferred response");
    }
}

async fn process_command(
    state: &AppState,
    payload: &SlackCommandPayload,
) -> anyhow::Result<SlackResponse> {
    let mut tokens = payload.text.split_whitespace();
    let thread_link = tokens.next().unwrap_or_default();
    let chat_id_arg = tokens.next();

    if thread_link.is_empty() {
        return Ok(SlackResponse::ephemeral(USAGE_HINT));
    }

    let Some(reference) = parse_thread_link(thread_link) else {
        tracing::debug!(link = %thread_link, "Unparsable thread link");
        return Ok(SlackResponse::ephemeral(INVALID_LINK));
    };

    let chat_id = match chat_id_arg {
        Some(id) => id.to_string(),
        None => generate_chat_id(),
    };
    tracing::debug!(chat_id = %chat_id, channel = %reference.channel_id, "Resolved thread reference");

    let messages = state
        .slack
        .thread_messages(&reference.channel_id, &reference.thread_ts)
        .await?;

    if messages.is_empty() {
        return Ok(SlackResponse::ephemeral(EMPTY_THREAD));
    }

    state
        .store
        .add_thread(&chat_id, &reference.channel_id, &reference.thread_ts)
        .await?;

    let thread = ThreadData::new(reference, messages);
    let reply = state.forwarder.send_thread(&chat_id, &thread).await?;

    Ok(SlackResponse::in_channel(format!(
        "*ChatGPT Response:*\n\n{}\n\n_Chat ID: `{}` - To continue this conversation, \
         use `/chatgpt <thread_link> {}` with another thread._",
        reply, chat_id, chat_id
    )))
}

/// Opaque 8-hex-char session key for sessions the user did not name.
fn generate_chat_id() -> String {
    hex::encode(rand::random::<[u8; 4]>())
}
