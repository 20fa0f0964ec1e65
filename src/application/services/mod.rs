mod ai_reply;
mod chat_command;
pub mod chat_text;
mod chat_service;
mod document_service;
mod entity_normalizer;
mod json_extraction;
pub mod prompts;

pub use ai_reply::{EntityExtraction, IngestAnalysis, RawEntities};
pub use chat_command::{COMMAND_MENU, ChatCommand};
pub use chat_service::{ChatService, ChatSessionStore, DEFAULT_MAX_FILE_BYTES, LanguageStore};
pub use document_service::{DispatchError, DocumentService, DocumentStore, Upload};
pub use entity_normalizer::normalize_entity_values;
pub use json_extraction::{JsonExtractionError, extract_json_object, parse_json_reply};
