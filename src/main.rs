//! Recipe finder - conversational recipe search bot
//!
//! Lets a chat narrow a recipe search with filter toggles, then pages
//! through matching recipes one at a time.

mod chat;
mod config;
mod filters;
mod runtime;
mod search;
mod state_machine;

use chat::TelegramTransport;
use config::BotConfig;
use runtime::{ChatTransport, SessionManager};
use search::{EdamamClient, LoggingClient, RecipeClient};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipe_finder=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Missing credentials stop the process before any session exists
    let config = BotConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;
    tracing::info!(config = ?config, "Configuration loaded");

    let edamam = EdamamClient::new(
        config.app_id.clone(),
        config.app_key.clone(),
        config.recipe_api_url.as_deref(),
        config.http_timeout,
    );
    let client: Arc<dyn RecipeClient> = Arc::new(LoggingClient::new(Arc::new(edamam)));

    let telegram = Arc::new(TelegramTransport::new(
        &config.telegram_token,
        config.telegram_api_url.as_deref(),
    ));
    let transport: Arc<dyn ChatTransport> = telegram.clone();

    let sessions = Arc::new(SessionManager::new(client, transport, config.session_idle_ttl));

    let cancel = CancellationToken::new();
    let poller = tokio::spawn(chat::run_polling(telegram, Arc::clone(&sessions), cancel.clone()));

    tokio::signal::ctrl_c().await?;
    tracing::info!(sessions = sessions.session_count().await, "Shutting down");
    cancel.cancel();
    poller.await?;

    Ok(())
}
