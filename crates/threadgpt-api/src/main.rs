use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use threadgpt_api::{app::build_router, config::Config, state::AppState};
use threadgpt_llm::{ChatClient, OpenAIClient};
use threadgpt_relay::Forwarder;
use threadgpt_session::{MemoryStore, MongoSessionStore, SessionStore};
use threadgpt_slack::SlackClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config =
        Config::load().map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting ThreadGPT API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Initialize outbound clients
    let slack = Arc::new(SlackClient::new(config.slack_bot_token.clone())?);
    let llm: Arc<dyn ChatClient> = Arc::new(OpenAIClient::new(config.openai_api_key.clone())?);

    // Initialize the session store
    let store: Arc<dyn SessionStore> = match config.storage.backend.as_str() {
        "mongodb" => {
            if config.mongodb_uri.is_empty() {
                anyhow::bail!("MONGODB_URI is required when storage.backend = \"mongodb\"");
            }
            tracing::info!("Connecting to MongoDB");
            let store =
                MongoSessionStore::connect(&config.mongodb_uri, &config.storage.database).await?;
            tracing::info!("MongoDB connected");
            Arc::new(store)
        }
        _ => {
            tracing::warn!("Using in-memory session store; sessions will not survive restarts");
            Arc::new(MemoryStore::new())
        }
    };

    let forwarder = Forwarder::new(llm, store.clone())
        .with_model(config.llm.model.clone())
        .with_max_tokens(config.llm.max_tokens);

    // Create application state
    let state = Arc::new(AppState::new(config.clone(), slack, store, forwarder));

    // Build router
    let app = build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry.with(tracing_subscriber::fmt::layer().json()).init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
