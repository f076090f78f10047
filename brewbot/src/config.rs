//! Runtime configuration loaded from environment variables.

use anyhow::Result;
use std::env;

/// Everything the bot needs at startup: Telegram access, webhook base URL,
/// store target, and the listen port.
#[derive(Debug, Clone)]
pub struct Config {
    /// TELEGRAM_BOT_TOKEN
    pub bot_token: String,
    /// WEBHOOK_URL (public base URL; "/webhook" is appended)
    pub webhook_url: String,
    /// CONNECTION_STRING (MongoDB URI)
    pub connection_string: String,
    /// DATABASE_NAME
    pub database_name: String,
    /// COLLECTION_NAME
    pub collection_name: String,
    /// PORT, defaults to 8080
    pub port: u16,
    /// LOG_FILE, defaults to logs/brewbot.log
    pub log_file: String,
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| anyhow::anyhow!("{} is missing", name))
}

impl Config {
    /// Loads from the environment. Any missing required variable is an error
    /// so startup can abort before the server binds.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bot_token: required("TELEGRAM_BOT_TOKEN")?,
            webhook_url: required("WEBHOOK_URL")?,
            connection_string: required("CONNECTION_STRING")?,
            database_name: required("DATABASE_NAME")?,
            collection_name: required("COLLECTION_NAME")?,
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "logs/brewbot.log".to_string()),
        })
    }

    /// Full webhook endpoint registered with Telegram.
    pub fn webhook_endpoint(&self) -> String {
        format!("{}/webhook", self.webhook_url.trim_end_matches('/'))
    }
}
