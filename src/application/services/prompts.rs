pub const DEFAULT_MAX_PROMPT_CHARS: usize = 50_000;
pub const TRUNCATION_MARKER: &str = "... (truncated)";

/// Cuts `text` to at most `max_chars` characters and appends the truncation
/// marker when anything was dropped.
pub fn truncate_for_prompt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{} {}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

pub fn ingest_prompt(document_text: &str, max_chars: usize) -> String {
    format!(
        "Analyze this legal document and extract key information.

DOCUMENT CONTENT:
{}

Provide JSON response with:
1. chunks: estimated number of logical sections/chunks
2. parties: array of people/organizations mentioned
3. amounts: array of monetary values mentioned
4. dates: array of important dates mentioned

Format as valid JSON only.",
        truncate_for_prompt(document_text, max_chars)
    )
}

pub fn entities_prompt(document_text: &str, max_chars: usize) -> String {
    format!(
        "Extract detailed entities from this legal document.

DOCUMENT CONTENT:
{}

Return JSON with STRING arrays only:
- parties: array of strings with names and roles
- amounts: array of strings with monetary values and context
- dates: array of strings with dates and descriptions
- terms: array of strings with key terms and conditions

IMPORTANT: Each array must contain only STRING values, not objects. Format as valid JSON only.",
        truncate_for_prompt(document_text, max_chars)
    )
}

pub fn ask_prompt(question: &str, document_text: &str, max_chars: usize) -> String {
    format!(
        "You are ShastraAI, a legal document analysis assistant.
Answer this question about the legal document: \"{}\"

DOCUMENT CONTENT:
{}

Provide a detailed, helpful answer with specific citations from the document content above.
Include relevant quotes and section references when possible.

Format your response as a clear, professional answer with proper citations.",
        question,
        truncate_for_prompt(document_text, max_chars)
    )
}
