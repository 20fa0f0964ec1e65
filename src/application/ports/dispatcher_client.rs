use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{Answer, DocumentId, EntityReport, IngestSummary};

/// The chat front end's view of the request dispatcher.
#[async_trait]
pub trait DispatcherClient: Send + Sync {
    async fn ingest(
        &self,
        doc_id: &DocumentId,
        filename: &str,
        data: Bytes,
    ) -> Result<IngestSummary, DispatcherClientError>;

    async fn entities(&self, doc_id: &DocumentId) -> Result<EntityReport, DispatcherClientError>;

    async fn ask(
        &self,
        doc_id: &DocumentId,
        question: &str,
    ) -> Result<Answer, DispatcherClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DispatcherClientError {
    /// The dispatcher answered with an `{error}` payload.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("dispatcher unreachable: {0}")]
    Network(String),
    #[error("invalid dispatcher response: {0}")]
    InvalidResponse(String),
}
