//! Command dispatcher: maps each inbound text to its handler and runs it.
//!
//! Handlers run independently per update; the injected store and outbound
//! transport are the only shared state.

use std::sync::Arc;

use brewbot_core::{Outbound, Result};
use brewbot_store::{StoreError, TeamStore};
use teloxide::types::{Update, UpdateKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::format::{
    not_found, stats_message, team_details, transactions_list, Delivery, CSV_CAPTION, CSV_FAILED,
    CSV_PROGRESS, FALLBACK, FIND_FAILED, FIND_PROMPT, FIND_USAGE, GREETING, NO_TRANSACTIONS,
    OVERFLOW_CAPTION, STATS_UNAVAILABLE, STORE_UNREACHABLE, TRANSACTIONS_FAILED, WELCOME,
};

/// What an inbound text resolves to. Commands and menu labels share handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Start,
    Stats,
    Find(String),
    FindUsage,
    FindPrompt,
    Registrations,
    Transactions,
    Greeting,
    Fallback,
}

impl Trigger {
    /// Resolves a message text: commands first, then menu labels, then the
    /// case-insensitive "hi" greeting; everything else falls back to the menu.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text == "/find" {
            return Trigger::FindUsage;
        }
        if let Some(rest) = text.strip_prefix("/find ") {
            let name = rest.trim();
            return if name.is_empty() {
                Trigger::FindUsage
            } else {
                Trigger::Find(name.to_string())
            };
        }
        match text {
            "/start" => Trigger::Start,
            "/stats" | "View Stats" => Trigger::Stats,
            "/registrations" | "Download Registrations" => Trigger::Registrations,
            "/transactions" | "View Transactions" => Trigger::Transactions,
            "Find a Team" => Trigger::FindPrompt,
            _ if text.eq_ignore_ascii_case("hi") => Trigger::Greeting,
            _ => Trigger::Fallback,
        }
    }
}

/// Maps a classified store failure to user-facing text: unreachable gets its
/// own message, everything else the operation's generic one.
fn store_failure_text<'a>(err: &StoreError, generic: &'a str) -> &'a str {
    match err {
        StoreError::Unavailable(_) => STORE_UNREACHABLE,
        _ => generic,
    }
}

pub struct Dispatcher {
    store: Arc<dyn TeamStore>,
    outbound: Arc<dyn Outbound>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn TeamStore>, outbound: Arc<dyn Outbound>) -> Self {
        Self { store, outbound }
    }

    /// Entry point for one inbound update. Non-text updates are ignored;
    /// handler errors are logged, never propagated.
    pub async fn dispatch(&self, update: Update) {
        let UpdateKind::Message(message) = update.kind else {
            debug!("ignoring non-message update");
            return;
        };
        let chat_id = message.chat.id.0;
        let Some(text) = message.text() else {
            debug!(chat_id, "ignoring message without text");
            return;
        };
        let user = message
            .from
            .as_ref()
            .map(|u| {
                u.username
                    .clone()
                    .unwrap_or_else(|| u.first_name.clone())
            })
            .unwrap_or_else(|| "Unknown".to_string());
        self.dispatch_text(chat_id, &user, text).await;
    }

    /// Runs the handler for one text message.
    pub async fn dispatch_text(&self, chat_id: i64, user: &str, text: &str) {
        let trigger = Trigger::parse(text);
        info!(chat_id, user, trigger = ?trigger, "dispatching");

        let result = match trigger {
            Trigger::Start => self.outbound.send_menu(chat_id, WELCOME).await,
            Trigger::Greeting => self.outbound.send_menu(chat_id, GREETING).await,
            Trigger::Fallback => self.outbound.send_menu(chat_id, FALLBACK).await,
            Trigger::FindUsage => self.outbound.send_text(chat_id, FIND_USAGE).await,
            Trigger::FindPrompt => self.outbound.send_text(chat_id, FIND_PROMPT).await,
            Trigger::Stats => self.send_stats(chat_id).await,
            Trigger::Find(name) => self.send_team(chat_id, &name).await,
            Trigger::Transactions => self.send_transactions(chat_id).await,
            Trigger::Registrations => self.send_registrations(chat_id).await,
        };
        if let Err(e) = result {
            error!(chat_id, error = %e, "handler failed");
        }
    }

    async fn send_stats(&self, chat_id: i64) -> Result<()> {
        match self.store.stats().await {
            Ok(stats) => self.outbound.send_text(chat_id, &stats_message(&stats)).await,
            Err(e) => {
                warn!(chat_id, error = %e, "stats query failed");
                self.outbound
                    .send_text(chat_id, store_failure_text(&e, STATS_UNAVAILABLE))
                    .await
            }
        }
    }

    async fn send_team(&self, chat_id: i64, name: &str) -> Result<()> {
        match self.store.find_team(name).await {
            Ok(Some(team)) => self.outbound.send_text(chat_id, &team_details(&team)).await,
            Ok(None) => self.outbound.send_text(chat_id, &not_found(name)).await,
            Err(e) => {
                warn!(chat_id, name, error = %e, "team lookup failed");
                self.outbound
                    .send_text(chat_id, store_failure_text(&e, FIND_FAILED))
                    .await
            }
        }
    }

    async fn send_transactions(&self, chat_id: i64) -> Result<()> {
        let entries = match self.store.transactions().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(chat_id, error = %e, "transactions query failed");
                return self
                    .outbound
                    .send_text(chat_id, store_failure_text(&e, TRANSACTIONS_FAILED))
                    .await;
            }
        };
        if entries.is_empty() {
            return self.outbound.send_text(chat_id, NO_TRANSACTIONS).await;
        }
        let text = transactions_list(&entries);
        self.deliver(chat_id, &text, "transactions_list.txt").await
    }

    /// Sends text inline, or as a document when it exceeds the size ceiling.
    /// The temp file is unique per request and removed when the handle drops,
    /// so failed sends cannot leave it behind.
    async fn deliver(&self, chat_id: i64, text: &str, file_name: &str) -> Result<()> {
        match Delivery::decide(text) {
            Delivery::Inline => self.outbound.send_text(chat_id, text).await,
            Delivery::AsFile => {
                let file = tempfile::NamedTempFile::new()?;
                std::fs::write(file.path(), text)?;
                self.outbound
                    .send_document(chat_id, file.path(), file_name, OVERFLOW_CAPTION)
                    .await?;
                file.close()?;
                Ok(())
            }
        }
    }

    async fn send_registrations(&self, chat_id: i64) -> Result<()> {
        let progress_id = self
            .outbound
            .send_text_and_return_id(chat_id, CSV_PROGRESS)
            .await?;

        // Unique per request; removed on drop whatever the outcome below.
        let file = tempfile::Builder::new()
            .prefix("registrations-")
            .suffix(".csv")
            .tempfile()?;

        match self.store.export_csv(file.path()).await {
            Ok(Some(path)) => {
                self.outbound
                    .send_document(chat_id, &path, "registrations.csv", CSV_CAPTION)
                    .await?;
                self.outbound.delete_message(chat_id, progress_id).await
            }
            Ok(None) => self.outbound.send_text(chat_id, CSV_FAILED).await,
            Err(e) => {
                warn!(chat_id, error = %e, "CSV export failed");
                self.outbound
                    .send_text(chat_id, store_failure_text(&e, CSV_FAILED))
                    .await
            }
        }
    }
}

/// Drains the update queue, running the dispatcher on a fresh task per update
/// so one slow handler never blocks the rest.
pub fn spawn_consumer(
    mut rx: mpsc::UnboundedReceiver<Update>,
    dispatcher: Arc<Dispatcher>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(update) = rx.recv().await {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move { dispatcher.dispatch(update).await });
        }
    })
}
