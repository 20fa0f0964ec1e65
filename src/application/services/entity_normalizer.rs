use serde_json::Value;

/// Coerces one entity field of a model reply into a list of non-empty strings.
///
/// Anything that is not an array yields an empty list. Inside the array,
/// strings are trimmed, objects and arrays are flattened to their JSON text
/// with braces and quotes stripped, numbers and booleans use their JSON text,
/// and nulls or blank results are dropped.
pub fn normalize_entity_values(field: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = field else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(coerce_to_string)
        .filter(|s| !s.is_empty())
        .collect()
}

fn coerce_to_string(item: &Value) -> Option<String> {
    match item {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()),
        Value::Bool(_) | Value::Number(_) => Some(item.to_string()),
        Value::Array(_) | Value::Object(_) => Some(flatten_structured(item)),
    }
}

fn flatten_structured(item: &Value) -> String {
    item.to_string()
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '"'))
        .collect::<String>()
        .trim()
        .to_string()
}
