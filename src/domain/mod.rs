mod analysis;
mod chat;
mod document;
mod document_id;
mod entity_set;
mod language;

pub use analysis::{Answer, EntityReport, IngestSummary, PLACEHOLDER_HITS};
pub use chat::{ChatId, ChatSession, ChatUserId, IncomingFile, IncomingMessage, MessageContent};
pub use document::{DocumentFormat, DocumentRecord, display_extension};
pub use document_id::{DEFAULT_DOCUMENT_ID, DocumentId};
pub use entity_set::{EntityKind, EntitySet};
pub use language::Language;
