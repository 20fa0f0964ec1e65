use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::application::ports::{DispatcherClient, DispatcherClientError};
use crate::domain::{Answer, DocumentFormat, DocumentId, EntityReport, EntitySet, IngestSummary};

/// Calls the dispatcher's `/api` endpoint over HTTP.
pub struct HttpDispatcherClient {
    client: Client,
    api_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct IngestBody {
    doc_id: String,
    #[serde(default)]
    chunks: u64,
    #[serde(default)]
    entities: EntityLists,
}

#[derive(Deserialize)]
struct EntitiesBody {
    doc_id: String,
    #[serde(flatten)]
    entities: EntityLists,
}

#[derive(Deserialize)]
struct AskBody {
    doc_id: String,
    answer: String,
    #[serde(default)]
    hits: Vec<u32>,
}

#[derive(Default, Deserialize)]
struct EntityLists {
    #[serde(default)]
    parties: Vec<String>,
    #[serde(default)]
    amounts: Vec<String>,
    #[serde(default)]
    dates: Vec<String>,
    #[serde(default)]
    terms: Vec<String>,
}

impl From<EntityLists> for EntitySet {
    fn from(lists: EntityLists) -> Self {
        EntitySet {
            parties: lists.parties,
            amounts: lists.amounts,
            dates: lists.dates,
            terms: lists.terms,
        }
    }
}

impl HttpDispatcherClient {
    pub fn new(api_url: String, timeout: Duration) -> Result<Self, DispatcherClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DispatcherClientError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn send<R: DeserializeOwned>(
        &self,
        action: &str,
        request: RequestBuilder,
    ) -> Result<R, DispatcherClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| DispatcherClientError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| DispatcherClientError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            tracing::warn!(action, status = status.as_u16(), error = %message, "Dispatcher returned an error");
            return Err(DispatcherClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if let Ok(ErrorBody { error }) = serde_json::from_slice::<ErrorBody>(&body) {
            return Err(DispatcherClientError::Api {
                status: status.as_u16(),
                message: error,
            });
        }

        serde_json::from_slice(&body)
            .map_err(|e| DispatcherClientError::InvalidResponse(format!("{action}: {e}")))
    }
}

#[async_trait]
impl DispatcherClient for HttpDispatcherClient {
    #[tracing::instrument(skip(self, data), fields(doc_id = %doc_id, size = data.len()))]
    async fn ingest(
        &self,
        doc_id: &DocumentId,
        filename: &str,
        data: Bytes,
    ) -> Result<IngestSummary, DispatcherClientError> {
        let mime = DocumentFormat::from_filename(filename)
            .map(|format| format.as_mime())
            .unwrap_or("application/octet-stream");
        let part = Part::bytes(data.to_vec())
            .file_name(filename.to_string())
            .mime_str(mime)
            .map_err(|e| DispatcherClientError::InvalidResponse(e.to_string()))?;

        let form = Form::new()
            .text("action", "ingest")
            .text("doc_id", doc_id.as_str().to_string())
            .part("file", part);

        let body: IngestBody = self
            .send("ingest", self.client.post(&self.api_url).multipart(form))
            .await?;

        Ok(IngestSummary {
            doc_id: DocumentId::new(body.doc_id),
            chunks: body.chunks,
            entities: body.entities.into(),
        })
    }

    #[tracing::instrument(skip(self), fields(doc_id = %doc_id))]
    async fn entities(&self, doc_id: &DocumentId) -> Result<EntityReport, DispatcherClientError> {
        let body: EntitiesBody = self
            .send(
                "entities",
                self.client
                    .post(&self.api_url)
                    .json(&json!({ "action": "entities", "doc_id": doc_id.as_str() })),
            )
            .await?;

        Ok(EntityReport {
            doc_id: DocumentId::new(body.doc_id),
            entities: body.entities.into(),
        })
    }

    #[tracing::instrument(skip(self, question), fields(doc_id = %doc_id))]
    async fn ask(
        &self,
        doc_id: &DocumentId,
        question: &str,
    ) -> Result<Answer, DispatcherClientError> {
        let body: AskBody = self
            .send(
                "ask",
                self.client.post(&self.api_url).json(&json!({
                    "action": "ask",
                    "doc_id": doc_id.as_str(),
                    "q": question,
                })),
            )
            .await?;

        Ok(Answer {
            doc_id: DocumentId::new(body.doc_id),
            answer: body.answer,
            hits: body.hits,
        })
    }
}
