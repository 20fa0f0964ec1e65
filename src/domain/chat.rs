use std::fmt;

use chrono::{DateTime, Utc};

use super::{DocumentId, EntitySet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatUserId(i64);

impl ChatUserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChatUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(i64);

impl ChatId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The document a chat user is working with, plus the entity snapshot
/// returned at ingest time. Pointer and snapshot live in one record so a
/// re-ingest replaces both together.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    pub doc_id: DocumentId,
    pub filename: String,
    pub file_size: u64,
    pub processed_at: DateTime<Utc>,
    pub entities: EntitySet,
}

impl ChatSession {
    pub fn new(doc_id: DocumentId, filename: String, file_size: u64, entities: EntitySet) -> Self {
        Self {
            doc_id,
            filename,
            file_size,
            processed_at: Utc::now(),
            entities,
        }
    }
}

/// Platform-neutral view of an inbound chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    pub user_id: ChatUserId,
    pub content: MessageContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    File(IncomingFile),
    Unsupported,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncomingFile {
    pub file_id: String,
    pub file_name: String,
    pub file_size: Option<u64>,
}

impl IncomingMessage {
    /// Short description for inbound logging: the text or the file name.
    pub fn summary(&self) -> &str {
        match &self.content {
            MessageContent::Text(text) => text,
            MessageContent::File(file) => &file.file_name,
            MessageContent::Unsupported => "unknown",
        }
    }
}
