use std::sync::Arc;

use crate::application::ports::FileLoader;
use crate::application::services::{ChatService, DocumentService};
use crate::domain::DocumentId;

/// State of the dispatcher server.
pub struct AppState<F>
where
    F: FileLoader,
{
    pub document_service: Arc<DocumentService<F>>,
    pub default_doc_id: DocumentId,
    pub max_upload_bytes: usize,
}

impl<F> Clone for AppState<F>
where
    F: FileLoader,
{
    fn clone(&self) -> Self {
        Self {
            document_service: Arc::clone(&self.document_service),
            default_doc_id: self.default_doc_id.clone(),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

/// State of the chat front end's webhook server.
#[derive(Clone)]
pub struct BotState {
    pub chat_service: Arc<ChatService>,
    pub has_token: bool,
}
