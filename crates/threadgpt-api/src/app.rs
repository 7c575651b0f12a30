use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::middleware::logging;
use crate::routes::{command, fetch, health};
use crate::state::AppState;

/// Build the application router.
///
/// The webhook routes are POST-only; axum answers other methods with 405.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/slack-command", post(command::slack_command))
        .route("/api/fetch-thread", post(fetch::fetch_thread))
        .layer(axum::middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
