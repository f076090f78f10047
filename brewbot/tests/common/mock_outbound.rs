//! Recording [`Outbound`] implementation for integration tests.
//!
//! Captures every outbound call, including document content at send time, so
//! tests can assert on reply text and on temp-file lifetime after a handler
//! returns, without hitting Telegram.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use brewbot_core::{Outbound, Result};
use tokio::sync::mpsc;

/// One recorded outbound call.
#[derive(Debug, Clone)]
#[allow(dead_code)] // not every test asserts on every field
pub enum Sent {
    Text {
        chat_id: i64,
        text: String,
    },
    Menu {
        chat_id: i64,
        text: String,
    },
    Document {
        chat_id: i64,
        path: PathBuf,
        file_name: String,
        caption: String,
        /// File content read at send time, while the temp file still exists.
        content: Option<String>,
    },
    Deleted {
        chat_id: i64,
        message_id: i32,
    },
}

/// Mock transport that records every call; the receiver is held by the test.
pub struct MockOutbound {
    tx: mpsc::UnboundedSender<Sent>,
}

impl MockOutbound {
    /// Creates a MockOutbound and returns the receiver for recorded calls.
    pub fn with_receiver() -> (Arc<Self>, mpsc::UnboundedReceiver<Sent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

#[async_trait]
impl Outbound for MockOutbound {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        let _ = self.tx.send(Sent::Text {
            chat_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_menu(&self, chat_id: i64, text: &str) -> Result<()> {
        let _ = self.tx.send(Sent::Menu {
            chat_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_text_and_return_id(&self, chat_id: i64, text: &str) -> Result<i32> {
        let _ = self.tx.send(Sent::Text {
            chat_id,
            text: text.to_string(),
        });
        Ok(1)
    }

    async fn send_document(
        &self,
        chat_id: i64,
        path: &Path,
        file_name: &str,
        caption: &str,
    ) -> Result<()> {
        let _ = self.tx.send(Sent::Document {
            chat_id,
            path: path.to_path_buf(),
            file_name: file_name.to_string(),
            caption: caption.to_string(),
            content: std::fs::read_to_string(path).ok(),
        });
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        let _ = self.tx.send(Sent::Deleted {
            chat_id,
            message_id,
        });
        Ok(())
    }
}
