use super::{DocumentId, EntitySet};

/// Placeholder relevance indices returned with every answer. They carry no
/// ranking information.
pub const PLACEHOLDER_HITS: [u32; 3] = [1, 2, 3];

#[derive(Debug, Clone, PartialEq)]
pub struct IngestSummary {
    pub doc_id: DocumentId,
    pub chunks: u64,
    pub entities: EntitySet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityReport {
    pub doc_id: DocumentId,
    pub entities: EntitySet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub doc_id: DocumentId,
    pub answer: String,
    pub hits: Vec<u32>,
}

impl Answer {
    pub fn new(doc_id: DocumentId, answer: String) -> Self {
        Self {
            doc_id,
            answer,
            hits: PLACEHOLDER_HITS.to_vec(),
        }
    }
}
