//! Subset of the Telegram Bot API object model used by the bot.

use serde::{Deserialize, Serialize};

use crate::domain::{ChatId, ChatUserId, IncomingFile, IncomingMessage, MessageContent};

/// Envelope returned by every Bot API method.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub document: Option<Document>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Document {
    pub file_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct File {
    pub file_id: String,
    #[serde(default)]
    pub file_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BotCommand<'a> {
    pub command: &'a str,
    pub description: &'a str,
}

impl Update {
    /// Converts a message update into the platform-neutral form. Updates
    /// without a message or a sender are skipped.
    pub fn into_incoming(self) -> Option<IncomingMessage> {
        let message = self.message?;
        let user = message.from?;

        let content = match (message.document, message.text) {
            (Some(document), _) => MessageContent::File(IncomingFile {
                file_id: document.file_id,
                file_name: document.file_name.unwrap_or_else(|| "document".to_string()),
                file_size: document.file_size,
            }),
            (None, Some(text)) => MessageContent::Text(text),
            (None, None) => MessageContent::Unsupported,
        };

        Some(IncomingMessage {
            chat_id: ChatId::new(message.chat.id),
            user_id: ChatUserId::new(user.id),
            content,
        })
    }
}
