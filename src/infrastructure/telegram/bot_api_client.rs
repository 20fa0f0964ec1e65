use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::application::ports::{
    ChatTransport, CommandDescription, MessageFormat, TransportError,
};
use crate::domain::ChatId;

use super::types::{ApiResponse, BotCommand, File, Update};

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const MAX_MESSAGE_CHARS: usize = 4096;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Bot API client over plain HTTPS + JSON.
pub struct TelegramClient {
    client: Client,
    api_base: String,
    token: String,
}

impl TelegramClient {
    pub fn new(token: String, api_base: Option<String>) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_base: api_base
                .unwrap_or_else(|| TELEGRAM_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            token,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    fn file_url(&self, file_path: &str) -> String {
        format!("{}/file/bot{}/{}", self.api_base, self.token, file_path)
    }

    async fn call<P, R>(&self, method: &str, params: &P) -> Result<R, TransportError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(params)
            .send()
            .await
            .map_err(|e| TransportError::Network(without_url(e)))?;

        let status = response.status();
        let body: ApiResponse<R> = response.json().await.map_err(|e| {
            TransportError::InvalidResponse(format!("{method} (HTTP {status}): {}", without_url(e)))
        })?;

        if !body.ok {
            let description = body
                .description
                .unwrap_or_else(|| format!("HTTP {}", status));
            tracing::warn!(method, error_code = ?body.error_code, description = %description, "Bot API rejected request");
            return Err(TransportError::Rejected(description));
        }

        body.result
            .ok_or_else(|| TransportError::InvalidResponse(format!("{method}: missing result")))
    }

    /// Long-polls for updates after `offset`.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TransportError> {
        let mut params = json!({
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });
        if let Some(offset) = offset {
            params["offset"] = json!(offset);
        }

        self.call("getUpdates", &params).await
    }

    async fn send_part(
        &self,
        chat_id: ChatId,
        text: &str,
        format: MessageFormat,
    ) -> Result<(), TransportError> {
        let mut params = json!({
            "chat_id": chat_id.as_i64(),
            "text": text,
        });
        if format == MessageFormat::Markdown {
            params["parse_mode"] = json!("Markdown");
        }

        let _: serde_json::Value = self.call("sendMessage", &params).await?;
        Ok(())
    }

    /// Removes any registered webhook so that `getUpdates` is allowed.
    pub async fn delete_webhook(&self) -> Result<(), TransportError> {
        let _: bool = self.call("deleteWebhook", &json!({})).await?;
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    #[tracing::instrument(skip(self, text), fields(chat_id = %chat_id, chars = text.chars().count()))]
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        format: MessageFormat,
    ) -> Result<(), TransportError> {
        for part in split_message(text, MAX_MESSAGE_CHARS) {
            match self.send_part(chat_id, part, format).await {
                Err(TransportError::Rejected(reason)) if format == MessageFormat::Markdown => {
                    tracing::warn!(reason = %reason, "Markdown part rejected, resending as plain text");
                    self.send_part(chat_id, part, MessageFormat::Plain).await?;
                }
                other => other?,
            }
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn download_file(&self, file_id: &str) -> Result<Bytes, TransportError> {
        let file: File = self.call("getFile", &json!({ "file_id": file_id })).await?;
        let file_path = file.file_path.ok_or_else(|| {
            TransportError::InvalidResponse(format!("file {} has no download path", file.file_id))
        })?;

        let response = self
            .client
            .get(self.file_url(&file_path))
            .send()
            .await
            .map_err(|e| TransportError::Network(without_url(e)))?;

        if !response.status().is_success() {
            return Err(TransportError::Rejected(format!(
                "file download failed: HTTP {}",
                response.status()
            )));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(without_url(e)))?;

        tracing::debug!(size = data.len(), "Downloaded chat file");
        Ok(data)
    }

    async fn set_commands(&self, commands: &[CommandDescription]) -> Result<(), TransportError> {
        let commands: Vec<BotCommand<'_>> = commands
            .iter()
            .map(|c| BotCommand {
                command: c.command,
                description: c.description,
            })
            .collect();

        let _: bool = self
            .call("setMyCommands", &json!({ "commands": commands }))
            .await?;
        Ok(())
    }
}

/// Request URLs embed the bot token; keep them out of error messages.
fn without_url(error: reqwest::Error) -> String {
    error.without_url().to_string()
}

/// Splits `text` into pieces of at most `limit` characters, preferring to
/// break after a newline.
pub fn split_message(text: &str, limit: usize) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = text;

    while rest.chars().count() > limit {
        let hard_end = rest
            .char_indices()
            .nth(limit)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let end = match rest[..hard_end].rfind('\n') {
            Some(idx) if idx > 0 => idx + 1,
            _ => hard_end,
        };
        parts.push(&rest[..end]);
        rest = &rest[end..];
    }

    if !rest.is_empty() || parts.is_empty() {
        parts.push(rest);
    }
    parts
}
