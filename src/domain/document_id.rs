use std::fmt;

pub const DEFAULT_DOCUMENT_ID: &str = "demo-doc";

/// Opaque key of a cached document. Callers choose it; the chat front end
/// derives one per user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Falls back to `default` when the caller sent nothing usable.
    pub fn or_default(id: Option<&str>, default: &DocumentId) -> Self {
        match id.map(str::trim) {
            Some(id) if !id.is_empty() => Self(id.to_string()),
            _ => default.clone(),
        }
    }

    pub fn for_chat_user(user_id: i64) -> Self {
        Self(format!("user_{}", user_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self(DEFAULT_DOCUMENT_ID.to_string())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
