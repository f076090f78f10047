//! Binary entry point: config, tracing, store client, webhook registration,
//! HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use brewbot::config::Config;
use brewbot::dispatch::{spawn_consumer, Dispatcher};
use brewbot::webhook;
use brewbot_core::{init_tracing, TelegramOutbound};
use brewbot_store::{Client, MongoTeamStore};
use teloxide::prelude::*;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Fail fast: no server is bound when required configuration is absent.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(&config.log_file)?;

    let client = Client::with_uri_str(&config.connection_string)
        .await
        .context("create MongoDB client")?;
    let store = Arc::new(MongoTeamStore::new(
        &client,
        &config.database_name,
        &config.collection_name,
    ));

    let bot = Bot::new(config.bot_token.clone());
    let endpoint = config.webhook_endpoint();
    let url = endpoint.parse().context("invalid WEBHOOK_URL")?;
    bot.set_webhook(url).await.context("set Telegram webhook")?;
    info!("Webhook set to: {endpoint}");

    let outbound = Arc::new(TelegramOutbound::new(bot));
    let dispatcher = Arc::new(Dispatcher::new(store, outbound));

    let (queue, updates) = mpsc::unbounded_channel();
    spawn_consumer(updates, dispatcher);

    let app = webhook::create_router(queue);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting webhook server on http://{addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
}
