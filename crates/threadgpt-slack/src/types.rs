use serde::{Deserialize, Serialize};

/// A thread anchor resolved from a Slack link: channel + root timestamp.
///
/// Derived per request from the raw link text, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadReference {
    pub channel_id: String,
    pub thread_ts: String,
}

/// One normalized message out of a thread.
///
/// `username` is only set for bot/webhook-style messages that carry one;
/// regular user messages identify the author through `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub user: String,
    pub text: String,
    pub ts: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Snapshot of one thread's content at fetch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadData {
    pub messages: Vec<ThreadMessage>,
    pub channel_id: String,
    pub thread_ts: String,
}

impl ThreadData {
    pub fn new(reference: ThreadReference, messages: Vec<ThreadMessage>) -> Self {
        Self {
            messages,
            channel_id: reference.channel_id,
            thread_ts: reference.thread_ts,
        }
    }
}
