pub mod error;
pub mod memory;
pub mod models;
#[cfg(feature = "mongodb")]
pub mod mongo;
pub mod store;

pub use error::SessionError;
pub use memory::MemoryStore;
pub use models::{Role, Session, ThreadKey, Turn, DEFAULT_SYSTEM_PROMPT};
#[cfg(feature = "mongodb")]
pub use mongo::MongoSessionStore;
pub use store::SessionStore;
