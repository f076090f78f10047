//! Webhook receiver: liveness routes plus the single inbound update route.
//!
//! `POST /webhook` always answers with transport-level success; failures are
//! reported in the body so Telegram does not treat a bot-side fault as a
//! delivery failure and retry forever.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use teloxide::types::Update;
use tokio::sync::mpsc;
use tracing::error;

/// Sender half of the update queue. The consumer loop
/// ([`crate::dispatch::spawn_consumer`]) drains the other half.
pub type UpdateQueue = mpsc::UnboundedSender<Update>;

pub fn create_router(queue: UpdateQueue) -> Router {
    Router::new()
        .route("/", get(index).head(index_head))
        .route("/webhook", post(webhook))
        .with_state(queue)
}

async fn index() -> Json<Value> {
    Json(json!({ "status": "Bot is running!" }))
}

async fn index_head() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn webhook(State(queue): State<UpdateQueue>, body: String) -> Json<Value> {
    let update: Update = match serde_json::from_str(&body) {
        Ok(update) => update,
        Err(e) => {
            error!(error = %e, "failed to parse webhook update");
            return Json(json!({ "status": "error", "message": e.to_string() }));
        }
    };
    if let Err(e) = queue.send(update) {
        error!(error = %e, "update queue closed");
        return Json(json!({ "status": "error", "message": "update queue closed" }));
    }
    Json(json!({ "status": "ok" }))
}
