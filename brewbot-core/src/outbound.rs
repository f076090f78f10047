//! Outbound transport: sending text, the menu keyboard, and document attachments.
//!
//! [`Outbound`] is transport-agnostic; [`TelegramOutbound`] implements it via
//! teloxide. Tests substitute a recording implementation.

use std::path::Path;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InputFile, KeyboardButton, KeyboardMarkup, MessageId, ReplyMarkup};

use crate::error::{BotError, Result};

/// Reply keyboard shown with the welcome, greeting, and fallback messages.
pub fn main_menu() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new("View Stats"),
            KeyboardButton::new("View Transactions"),
        ],
        vec![
            KeyboardButton::new("Download Registrations"),
            KeyboardButton::new("Find a Team"),
        ],
    ])
    .resize_keyboard()
    .persistent()
}

/// Abstraction over the chat transport. Implementations map to Telegram;
/// tests use a recording substitute.
#[async_trait]
pub trait Outbound: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()>;
    /// Sends a text message with the main menu keyboard attached.
    async fn send_menu(&self, chat_id: i64, text: &str) -> Result<()>;
    /// Sends a text message and returns its id so it can be deleted later
    /// (used for progress notices).
    async fn send_text_and_return_id(&self, chat_id: i64, text: &str) -> Result<i32>;
    /// Sends a local file as a document attachment with the given name and caption.
    async fn send_document(
        &self,
        chat_id: i64,
        path: &Path,
        file_name: &str,
        caption: &str,
    ) -> Result<()>;
    /// Deletes a previously sent message.
    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()>;
}

/// Teloxide-based implementation of [`Outbound`].
pub struct TelegramOutbound {
    bot: teloxide::Bot,
}

impl TelegramOutbound {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl Outbound for TelegramOutbound {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map_err(|e| BotError::Telegram(e.to_string()))?;
        Ok(())
    }

    async fn send_menu(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .reply_markup(ReplyMarkup::Keyboard(main_menu()))
            .await
            .map_err(|e| BotError::Telegram(e.to_string()))?;
        Ok(())
    }

    async fn send_text_and_return_id(&self, chat_id: i64, text: &str) -> Result<i32> {
        let sent = self
            .bot
            .send_message(ChatId(chat_id), text)
            .await
            .map_err(|e| BotError::Telegram(e.to_string()))?;
        Ok(sent.id.0)
    }

    async fn send_document(
        &self,
        chat_id: i64,
        path: &Path,
        file_name: &str,
        caption: &str,
    ) -> Result<()> {
        let file = InputFile::file(path.to_path_buf()).file_name(file_name.to_string());
        self.bot
            .send_document(ChatId(chat_id), file)
            .caption(caption.to_string())
            .await
            .map_err(|e| BotError::Telegram(e.to_string()))?;
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.bot
            .delete_message(ChatId(chat_id), MessageId(message_id))
            .await
            .map_err(|e| BotError::Telegram(e.to_string()))?;
        Ok(())
    }
}
