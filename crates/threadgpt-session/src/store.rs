use async_trait::async_trait;

use crate::error::Result;
use crate::models::Session;

/// Trait for session persistence operations
///
/// Implementations are flat key-value stores keyed by the opaque chat id.
/// There is no optimistic locking: concurrent writers to the same id race and
/// the last write wins, which matches the one-command-at-a-time usage pattern
/// of the calling platform.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a session by id, or `None` if it has never been stored.
    async fn get(&self, id: &str) -> Result<Option<Session>>;

    /// Durably write a session, overwriting any previous value for its id.
    async fn put(&self, session: &Session) -> Result<()>;

    /// Load a session, seeding a fresh one (system turn only) for unknown ids.
    ///
    /// Absence never fails the caller-visible flow.
    async fn get_or_seed(&self, id: &str) -> Result<Session> {
        Ok(self
            .get(id)
            .await?
            .unwrap_or_else(|| Session::new(id)))
    }

    /// Record a source thread on a session, creating the session if needed.
    ///
    /// Idempotent: adding a (channel, ts) pair already present is a no-op and
    /// does not refresh `updated_at`.
    async fn add_thread(&self, id: &str, channel_id: &str, thread_ts: &str) -> Result<()> {
        let (mut session, is_new) = match self.get(id).await? {
            Some(session) => (session, false),
            None => (Session::new(id), true),
        };

        let added = session.record_thread(channel_id, thread_ts);

        if is_new || added {
            self.put(&session).await?;
        }

        Ok(())
    }
}
