pub mod client;
pub mod error;
pub mod format;
pub mod link;
pub mod types;

pub use client::SlackClient;
pub use error::SlackError;
pub use format::format_thread;
pub use link::parse_thread_link;
pub use types::{ThreadData, ThreadMessage, ThreadReference};
