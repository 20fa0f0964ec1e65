use serde::Deserialize;
use serde_json::Value;

use crate::domain::EntitySet;

use super::entity_normalizer::normalize_entity_values;

/// Entity arrays as the model returned them. Fields stay untyped so that
/// objects or numbers inside the arrays survive until normalization.
#[derive(Debug, Default, Deserialize)]
pub struct RawEntities {
    #[serde(default)]
    pub parties: Option<Value>,
    #[serde(default)]
    pub amounts: Option<Value>,
    #[serde(default)]
    pub dates: Option<Value>,
    #[serde(default)]
    pub terms: Option<Value>,
}

impl RawEntities {
    pub fn normalize(&self) -> EntitySet {
        EntitySet {
            parties: normalize_entity_values(self.parties.as_ref()),
            amounts: normalize_entity_values(self.amounts.as_ref()),
            dates: normalize_entity_values(self.dates.as_ref()),
            terms: normalize_entity_values(self.terms.as_ref()),
        }
    }
}

/// Reply to the ingest prompt.
#[derive(Debug, Default, Deserialize)]
pub struct IngestAnalysis {
    #[serde(default)]
    pub chunks: Option<Value>,
    #[serde(flatten)]
    pub entities: RawEntities,
}

impl IngestAnalysis {
    /// The model's section estimate; anything that is not a non-negative
    /// number (or a numeric string) counts as zero.
    pub fn chunk_count(&self) -> u64 {
        match &self.chunks {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }
}

/// Reply to the entities prompt.
#[derive(Debug, Default, Deserialize)]
pub struct EntityExtraction {
    #[serde(flatten)]
    pub entities: RawEntities,
}
