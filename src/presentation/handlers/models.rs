//! Wire shapes of the `/api` dispatcher.

use serde::{Deserialize, Serialize};

use crate::domain::{Answer, EntityReport, EntitySet, IngestSummary};

/// JSON body of a dispatcher call. Every field is optional: a body without
/// a known `action` gets the liveness payload.
#[derive(Debug, Default, Deserialize)]
pub struct DispatchRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub doc_id: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub doc_id: String,
    pub chunks: u64,
    pub message: String,
    pub entities: IngestEntities,
}

#[derive(Debug, Serialize)]
pub struct IngestEntities {
    pub parties: Vec<String>,
    pub amounts: Vec<String>,
    pub dates: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EntitiesResponse {
    pub doc_id: String,
    pub parties: Vec<String>,
    pub amounts: Vec<String>,
    pub dates: Vec<String>,
    pub terms: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub hits: Vec<u32>,
    pub doc_id: String,
}

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub message: String,
    pub timestamp: String,
    pub method: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<IngestSummary> for IngestResponse {
    fn from(summary: IngestSummary) -> Self {
        let EntitySet {
            parties,
            amounts,
            dates,
            ..
        } = summary.entities;

        Self {
            doc_id: summary.doc_id.to_string(),
            chunks: summary.chunks,
            message: "Document processed".to_string(),
            entities: IngestEntities {
                parties,
                amounts,
                dates,
            },
        }
    }
}

impl From<EntityReport> for EntitiesResponse {
    fn from(report: EntityReport) -> Self {
        Self {
            doc_id: report.doc_id.to_string(),
            parties: report.entities.parties,
            amounts: report.entities.amounts,
            dates: report.entities.dates,
            terms: report.entities.terms,
        }
    }
}

impl From<Answer> for AskResponse {
    fn from(answer: Answer) -> Self {
        Self {
            answer: answer.answer,
            hits: answer.hits,
            doc_id: answer.doc_id.to_string(),
        }
    }
}
