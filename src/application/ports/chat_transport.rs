use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::ChatId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    Plain,
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescription {
    pub command: &'static str,
    pub description: &'static str,
}

/// Outbound side of the chat platform.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Delivers `text`, split into as many platform messages as needed.
    /// Markdown the platform rejects is resent as plain text, part by part.
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        format: MessageFormat,
    ) -> Result<(), TransportError>;

    async fn download_file(&self, file_id: &str) -> Result<Bytes, TransportError>;

    async fn set_commands(&self, commands: &[CommandDescription]) -> Result<(), TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request rejected by chat platform: {0}")]
    Rejected(String),
    #[error("chat platform unreachable: {0}")]
    Network(String),
    #[error("invalid chat platform response: {0}")]
    InvalidResponse(String),
}
