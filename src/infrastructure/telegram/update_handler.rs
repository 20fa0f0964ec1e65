use crate::application::services::ChatService;
use crate::infrastructure::observability::sanitize_prompt;

use super::types::Update;

/// Logs an inbound update and runs it through the chat service.
pub async fn handle_update(service: &ChatService, update: Update) {
    let update_id = update.update_id;
    let Some(message) = update.into_incoming() else {
        tracing::debug!(update_id, "Skipping update without a user message");
        return;
    };

    tracing::info!(
        update_id,
        user_id = %message.user_id,
        content = %sanitize_prompt(message.summary()),
        "Inbound chat message"
    );

    service.handle(message).await;
}
