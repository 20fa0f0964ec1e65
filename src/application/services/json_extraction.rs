use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

// Greedy: from the first `{` to the last `}` in the reply.
static JSON_OBJECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

#[derive(Debug, thiserror::Error)]
pub enum JsonExtractionError {
    #[error("no JSON object found in response")]
    NoObjectFound,
    #[error("malformed JSON object: {0}")]
    Malformed(String),
    #[error("unexpected JSON shape: {0}")]
    UnexpectedShape(String),
}

/// Best-effort extraction of the JSON object a model embedded in free text
/// (markdown fences, preambles and trailing remarks are tolerated).
pub fn extract_json_object(text: &str) -> Result<Value, JsonExtractionError> {
    let candidate = JSON_OBJECT
        .find(text)
        .ok_or(JsonExtractionError::NoObjectFound)?;

    let value: Value = serde_json::from_str(candidate.as_str())
        .map_err(|e| JsonExtractionError::Malformed(e.to_string()))?;

    if !value.is_object() {
        return Err(JsonExtractionError::NoObjectFound);
    }

    Ok(value)
}

pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T, JsonExtractionError> {
    let value = extract_json_object(text)?;
    serde_json::from_value(value).map_err(|e| JsonExtractionError::UnexpectedShape(e.to_string()))
}
