use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// System prompt seeded as the first turn of every new session.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant that receives content from \
     Slack threads. Please respond based on the thread content provided.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged unit of a completion-API conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A (channel, thread_ts) pair recorded as provenance on a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadKey {
    pub channel_id: String,
    pub thread_ts: String,
}

/// A multi-turn conversation history keyed by an opaque chat id.
///
/// `turns[0]` is always the single system turn seeded at creation; user and
/// assistant turns are appended in pairs by the forwarder, so a successfully
/// stored session never ends mid-pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub turns: Vec<Turn>,
    #[serde(default)]
    pub threads: Vec<ThreadKey>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session seeded with the system turn.
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            turns: vec![Turn::new(Role::System, DEFAULT_SYSTEM_PROMPT)],
            threads: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::new(Role::User, content));
        self.updated_at = Utc::now();
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::new(Role::Assistant, content));
        self.updated_at = Utc::now();
    }

    /// Record a source thread on this session. Returns `true` if the pair was
    /// new; recording an already-present pair is a no-op and leaves
    /// `updated_at` unchanged.
    pub fn record_thread(&mut self, channel_id: &str, thread_ts: &str) -> bool {
        let already_recorded = self
            .threads
            .iter()
            .any(|t| t.channel_id == channel_id && t.thread_ts == thread_ts);
        if already_recorded {
            return false;
        }

        self.threads.push(ThreadKey {
            channel_id: channel_id.to_string(),
            thread_ts: thread_ts.to_string(),
        });
        self.updated_at = Utc::now();
        true
    }
}
