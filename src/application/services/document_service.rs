use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{
    FileLoader, FileLoaderError, LlmClient, LlmClientError, SessionStore,
};
use crate::domain::{
    Answer, DocumentFormat, DocumentId, DocumentRecord, EntityReport, IngestSummary,
    display_extension,
};

use super::ai_reply::{EntityExtraction, IngestAnalysis};
use super::json_extraction::parse_json_reply;
use super::prompts::{ask_prompt, entities_prompt, ingest_prompt};

pub type DocumentStore = dyn SessionStore<DocumentId, DocumentRecord>;

/// A file received by the dispatcher, still undecoded.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub data: Bytes,
}

/// Handles the `ingest`, `entities` and `ask` actions against the document
/// store and the completion service.
pub struct DocumentService<F>
where
    F: FileLoader,
{
    file_loader: Arc<F>,
    llm_client: Option<Arc<dyn LlmClient>>,
    store: Arc<DocumentStore>,
    max_prompt_chars: usize,
}

impl<F> DocumentService<F>
where
    F: FileLoader,
{
    pub fn new(
        file_loader: Arc<F>,
        llm_client: Option<Arc<dyn LlmClient>>,
        store: Arc<DocumentStore>,
        max_prompt_chars: usize,
    ) -> Self {
        Self {
            file_loader,
            llm_client,
            store,
            max_prompt_chars,
        }
    }

    pub fn ai_enabled(&self) -> bool {
        self.llm_client.is_some()
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    #[tracing::instrument(skip(self, upload), fields(doc_id = %doc_id))]
    pub async fn ingest(
        &self,
        doc_id: DocumentId,
        upload: Option<Upload>,
    ) -> Result<IngestSummary, DispatchError> {
        let upload = upload.ok_or(DispatchError::MissingFile)?;

        let format = DocumentFormat::from_filename(&upload.filename).ok_or_else(|| {
            DispatchError::UnsupportedFormat(display_extension(&upload.filename))
        })?;

        let llm_client = self.llm_client()?;

        tracing::info!(
            filename = %upload.filename,
            size = upload.data.len(),
            format = format.as_mime(),
            "Processing file"
        );

        let text = self.file_loader.extract_text(&upload.data, format).await?;

        if text.trim().is_empty() {
            return Err(DispatchError::EmptyText);
        }

        tracing::debug!(chars = text.chars().count(), "Extracted document text");

        let reply = llm_client
            .complete(&ingest_prompt(&text, self.max_prompt_chars))
            .await?;

        let analysis: IngestAnalysis = parse_json_reply(&reply).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse AI ingest response");
            DispatchError::UpstreamParseFailure("AI response parsing failed".to_string())
        })?;

        let entities = analysis.entities.normalize();
        let chunks = analysis.chunk_count();

        self.store
            .put(
                doc_id.clone(),
                DocumentRecord::new(doc_id.clone(), text, entities.clone(), upload.filename),
            )
            .await;

        tracing::info!(
            chunks,
            parties = entities.parties.len(),
            amounts = entities.amounts.len(),
            dates = entities.dates.len(),
            "Document processed"
        );

        Ok(IngestSummary {
            doc_id,
            chunks,
            entities,
        })
    }

    #[tracing::instrument(skip(self), fields(doc_id = %doc_id))]
    pub async fn entities(&self, doc_id: DocumentId) -> Result<EntityReport, DispatchError> {
        let record = self.find(&doc_id).await?;
        let llm_client = self.llm_client()?;

        let reply = llm_client
            .complete(&entities_prompt(&record.raw_text, self.max_prompt_chars))
            .await?;

        let extraction: EntityExtraction = parse_json_reply(&reply).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse AI entities response");
            DispatchError::UpstreamParseFailure("AI entities response parsing failed".to_string())
        })?;

        Ok(EntityReport {
            doc_id,
            entities: extraction.entities.normalize(),
        })
    }

    #[tracing::instrument(skip(self, question), fields(doc_id = %doc_id))]
    pub async fn ask(&self, doc_id: DocumentId, question: &str) -> Result<Answer, DispatchError> {
        let record = self.find(&doc_id).await?;
        let llm_client = self.llm_client()?;

        let question = question.trim();
        if question.is_empty() {
            return Err(DispatchError::MissingQuestion);
        }

        tracing::debug!(question_chars = question.chars().count(), "Answering question");

        let answer = llm_client
            .complete(&ask_prompt(question, &record.raw_text, self.max_prompt_chars))
            .await?;

        Ok(Answer::new(doc_id, answer))
    }

    async fn find(&self, doc_id: &DocumentId) -> Result<DocumentRecord, DispatchError> {
        self.store.get(doc_id).await.ok_or_else(|| {
            tracing::warn!(doc_id = %doc_id, "Document not found");
            DispatchError::NotFound(doc_id.clone())
        })
    }

    fn llm_client(&self) -> Result<&Arc<dyn LlmClient>, DispatchError> {
        self.llm_client
            .as_ref()
            .ok_or(DispatchError::UpstreamUnavailable)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("No file uploaded")]
    MissingFile,
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("No text content found in the document")]
    EmptyText,
    #[error("No question provided")]
    MissingQuestion,
    #[error("Document not found. Please upload a document first.")]
    NotFound(DocumentId),
    #[error("Tool not active")]
    UpstreamUnavailable,
    #[error("{0}")]
    UpstreamParseFailure(String),
    #[error("{0}")]
    Internal(String),
}

impl From<FileLoaderError> for DispatchError {
    fn from(e: FileLoaderError) -> Self {
        match e {
            FileLoaderError::UnsupportedFormat(ext) => DispatchError::UnsupportedFormat(ext),
            FileLoaderError::NoTextFound => DispatchError::EmptyText,
            other => DispatchError::Internal(other.to_string()),
        }
    }
}

impl From<LlmClientError> for DispatchError {
    fn from(e: LlmClientError) -> Self {
        tracing::error!(error = %e, "Completion request failed");
        DispatchError::Internal(e.to_string())
    }
}
