use std::sync::Arc;

use threadgpt_relay::Forwarder;
use threadgpt_session::SessionStore;
use threadgpt_slack::SlackClient;

use crate::config::Config;
use crate::respond::Responder;

/// Shared application state passed to all handlers
///
/// All cross-request state lives in the session store; the handlers
/// themselves are stateless.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub slack: Arc<SlackClient>,
    pub store: Arc<dyn SessionStore>,
    pub forwarder: Arc<Forwarder>,
    pub responder: Arc<Responder>,
}

impl AppState {
    pub fn new(
        config: Config,
        slack: Arc<SlackClient>,
        store: Arc<dyn SessionStore>,
        forwarder: Forwarder,
    ) -> Self {
        Self {
            config: Arc::new(config),
            slack,
            store,
            forwarder: Arc::new(forwarder),
            responder: Arc::new(Responder::new()),
        }
    }
}
