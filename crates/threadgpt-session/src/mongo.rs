use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{bson::doc, Client, Collection};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};
use crate::models::{Session, ThreadKey, Turn};
use crate::store::SessionStore;

const COLLECTION: &str = "chat_contexts";

/// Namespace prefix distinguishing completion-context records from any other
/// record type sharing the store.
const KEY_PREFIX: &str = "chatgpt:chat:";

/// Durable key for a chat id.
pub fn session_key(id: &str) -> String {
    format!("{}{}", KEY_PREFIX, id)
}

/// MongoDB-specific session document, keyed by the namespaced string.
///
/// The collection is used as a flat key-value mapping: one document per
/// session, replaced wholesale on every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDocument {
    #[serde(rename = "_id")]
    pub key: String,
    pub session_id: String,
    pub turns: Vec<Turn>,
    #[serde(default)]
    pub threads: Vec<ThreadKey>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Session> for SessionDocument {
    fn from(session: &Session) -> Self {
        Self {
            key: session_key(&session.id),
            session_id: session.id.clone(),
            turns: session.turns.clone(),
            threads: session.threads.clone(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

impl From<SessionDocument> for Session {
    fn from(doc: SessionDocument) -> Self {
        Self {
            id: doc.session_id,
            turns: doc.turns,
            threads: doc.threads,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

pub struct MongoSessionStore {
    collection: Collection<SessionDocument>,
}

impl MongoSessionStore {
    /// Connect to MongoDB and create the store
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| SessionError::Connection(e.to_string()))?;

        Ok(Self {
            collection: client.database(database).collection(COLLECTION),
        })
    }
}

#[async_trait]
impl SessionStore for MongoSessionStore {
    async fn get(&self, id: &str) -> Result<Option<Session>> {
        let filter = doc! { "_id": session_key(id) };
        let document = self.collection.find_one(filter).await?;
        Ok(document.map(Session::from))
    }

    async fn put(&self, session: &Session) -> Result<()> {
        let document = SessionDocument::from(session);
        let filter = doc! { "_id": &document.key };
        self.collection
            .replace_one(filter, &document)
            .upsert(true)
            .await?;
        Ok(())
    }
}
