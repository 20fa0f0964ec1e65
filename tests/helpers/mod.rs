#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::Response;
use bytes::Bytes;
use http_body_util::BodyExt;

use shastra::application::ports::{
    ChatTransport, CommandDescription, DispatcherClient, DispatcherClientError, LlmClient,
    MessageFormat, TransportError,
};
use shastra::application::services::{DocumentService, DocumentStore};
use shastra::domain::{
    Answer, ChatId, DocumentId, DocumentRecord, EntityReport, EntitySet, IngestSummary,
};
use shastra::infrastructure::persistence::InMemorySessionStore;
use shastra::infrastructure::text_processing::MockFileLoader;
use shastra::presentation::{AppState, create_router};

pub const TEST_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const BOUNDARY: &str = "shastra-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<DocumentStore>,
}

pub fn create_test_app(llm_client: Option<Arc<dyn LlmClient>>) -> TestApp {
    let store: Arc<DocumentStore> =
        Arc::new(InMemorySessionStore::<DocumentId, DocumentRecord>::default());

    let document_service = Arc::new(DocumentService::new(
        Arc::new(MockFileLoader),
        llm_client,
        Arc::clone(&store),
        50_000,
    ));

    let router = create_router(AppState {
        document_service,
        default_doc_id: DocumentId::default(),
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
    });

    TestApp { router, store }
}

/// Builds a `multipart/form-data` body with text fields and an optional file.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((filename, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn ingest_reply() -> &'static str {
    r#"Here is the analysis:
```json
{
  "chunks": 3,
  "parties": ["Jane Doe (Tenant)", {"name": "John Smith", "role": "Landlord"}, ""],
  "amounts": ["$2,500.00 monthly rent"],
  "dates": ["January 1, 2024"]
}
```"#
}

pub fn entities_reply() -> &'static str {
    r#"{"parties": ["Jane Doe", "John Smith"], "amounts": ["$2,500.00"], "dates": ["January 1, 2024"], "terms": ["No smoking", null]}"#
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub format: MessageFormat,
}

/// Records outbound messages.
#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<SentMessage>>,
    pub registered_commands: Mutex<Vec<String>>,
    pub downloads: Mutex<Vec<String>>,
    pub file_data: Mutex<Bytes>,
}

impl RecordingTransport {
    pub fn with_file(data: &[u8]) -> Self {
        Self {
            file_data: Mutex::new(Bytes::copy_from_slice(data)),
            ..Self::default()
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|m| m.text.clone())
            .collect()
    }

    pub fn last_text(&self) -> String {
        self.texts().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        format: MessageFormat,
    ) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(SentMessage {
            chat_id,
            text: text.to_string(),
            format,
        });
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> Result<Bytes, TransportError> {
        self.downloads.lock().unwrap().push(file_id.to_string());
        Ok(self.file_data.lock().unwrap().clone())
    }

    async fn set_commands(&self, commands: &[CommandDescription]) -> Result<(), TransportError> {
        *self.registered_commands.lock().unwrap() =
            commands.iter().map(|c| c.command.to_string()).collect();
        Ok(())
    }
}

/// Answers every call from fixed data and records what was asked.
#[derive(Default)]
pub struct ScriptedDispatcher {
    pub calls: Mutex<Vec<String>>,
    pub entities: EntitySet,
    pub answer: String,
    pub api_error: Option<String>,
}

impl ScriptedDispatcher {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn fail(&self) -> Result<(), DispatcherClientError> {
        match &self.api_error {
            Some(message) => Err(DispatcherClientError::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DispatcherClient for ScriptedDispatcher {
    async fn ingest(
        &self,
        doc_id: &DocumentId,
        filename: &str,
        data: Bytes,
    ) -> Result<IngestSummary, DispatcherClientError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("ingest {doc_id} {filename} {}", data.len()));
        self.fail()?;

        Ok(IngestSummary {
            doc_id: doc_id.clone(),
            chunks: 4,
            entities: self.entities.clone(),
        })
    }

    async fn entities(&self, doc_id: &DocumentId) -> Result<EntityReport, DispatcherClientError> {
        self.calls.lock().unwrap().push(format!("entities {doc_id}"));
        self.fail()?;

        Ok(EntityReport {
            doc_id: doc_id.clone(),
            entities: self.entities.clone(),
        })
    }

    async fn ask(
        &self,
        doc_id: &DocumentId,
        question: &str,
    ) -> Result<Answer, DispatcherClientError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("ask {doc_id} {question}"));
        self.fail()?;

        Ok(Answer::new(doc_id.clone(), self.answer.clone()))
    }
}

pub fn lease_entities() -> EntitySet {
    EntitySet {
        parties: vec!["Jane Doe (Tenant)".to_string(), "John Smith (Landlord)".to_string()],
        amounts: vec!["$2,500.00".to_string()],
        dates: vec!["January 1, 2024".to_string()],
        terms: vec![],
    }
}
