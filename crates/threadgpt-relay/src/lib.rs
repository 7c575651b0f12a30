pub mod forwarder;

pub use forwarder::{Forwarder, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, NO_RESPONSE_FALLBACK};
