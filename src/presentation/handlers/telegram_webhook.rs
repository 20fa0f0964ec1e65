use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::Value;

use crate::infrastructure::telegram::{Update, handle_update};
use crate::presentation::state::BotState;

#[derive(Serialize)]
pub struct WebhookAck {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct WebhookStatus {
    pub message: &'static str,
    pub status: &'static str,
    pub has_token: bool,
    pub timestamp: String,
    pub webhook: &'static str,
}

/// Runs one pushed update through the chat service. Always acknowledges so
/// the platform does not redeliver.
#[tracing::instrument(skip(state, payload))]
pub async fn telegram_webhook_handler(
    State(state): State<BotState>,
    Json(payload): Json<Value>,
) -> impl IntoResponse {
    match serde_json::from_value::<Update>(payload) {
        Ok(update) => handle_update(&state.chat_service, update).await,
        Err(e) => tracing::warn!(error = %e, "Ignoring malformed webhook update"),
    }

    Json(WebhookAck { ok: true })
}

pub async fn telegram_webhook_status_handler(State(state): State<BotState>) -> impl IntoResponse {
    Json(WebhookStatus {
        message: "ShastraAI Telegram Bot Webhook",
        status: "active",
        has_token: state.has_token,
        timestamp: chrono::Utc::now().to_rfc3339(),
        webhook: "ready",
    })
}
