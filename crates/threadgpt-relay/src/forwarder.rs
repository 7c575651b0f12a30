use anyhow::{Context, Result};
use std::sync::Arc;

use threadgpt_llm::{ChatClient, ChatOptions, ChatRequest, Message};
use threadgpt_session::{Role, Session, SessionStore};
use threadgpt_slack::{format_thread, ThreadData};

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const NO_RESPONSE_FALLBACK: &str = "No response from ChatGPT";

const USER_TURN_PREFIX: &str = "New Slack thread content:\n\n";

/// Folds fetched thread content into a session's turn history, relays the
/// full history to the completion API, and persists the result.
pub struct Forwarder {
    llm: Arc<dyn ChatClient>,
    store: Arc<dyn SessionStore>,
    model: String,
    max_tokens: u32,
}

impl Forwarder {
    pub fn new(llm: Arc<dyn ChatClient>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            llm,
            store,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Send a thread snapshot through the session keyed by `chat_id` and
    /// return the generated reply.
    ///
    /// The session is persisted only after a successful completion: a failed
    /// API call leaves the stored history exactly as it was, so no session
    /// ever ends mid-pair.
    pub async fn send_thread(&self, chat_id: &str, thread: &ThreadData) -> Result<String> {
        let mut session = self.store.get_or_seed(chat_id).await?;
        tracing::debug!(
            chat_id = %chat_id,
            turns = session.turns.len(),
            "Loaded session for thread relay"
        );

        session.push_user(format!("{}{}", USER_TURN_PREFIX, format_thread(thread)));

        let request = ChatRequest::new(&self.model, session_messages(&session))
            .with_options(ChatOptions::new().max_tokens(self.max_tokens));

        let response = self
            .llm
            .chat(request)
            .await
            .context("Chat completion request failed")?;

        let reply = response
            .content
            .unwrap_or_else(|| NO_RESPONSE_FALLBACK.to_string());

        session.push_assistant(reply.clone());
        self.store
            .put(&session)
            .await
            .context("Failed to persist session")?;

        tracing::info!(
            chat_id = %chat_id,
            turns = session.turns.len(),
            "Relayed thread and stored reply"
        );

        Ok(reply)
    }
}

/// Render the full turn history (system + accumulated pairs, in order) as
/// completion-API messages.
fn session_messages(session: &Session) -> Vec<Message> {
    session
        .turns
        .iter()
        .map(|turn| match turn.role {
            Role::System => Message::system(turn.content.clone()),
            Role::User => Message::human(turn.content.clone()),
            Role::Assistant => Message::ai(turn.content.clone()),
        })
        .collect()
}
