use std::path::Path;

use chrono::{DateTime, Utc};

use super::{DocumentId, EntitySet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolves the format from the file extension, ignoring case.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = Path::new(filename)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();

        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Docx => ".docx",
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// Extension as the user sent it (lowercased, with the leading dot), used in
/// error messages for rejected uploads.
pub fn display_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub doc_id: DocumentId,
    pub raw_text: String,
    pub entities: EntitySet,
    pub filename: String,
    pub processed_at: DateTime<Utc>,
}

impl DocumentRecord {
    pub fn new(
        doc_id: DocumentId,
        raw_text: String,
        entities: EntitySet,
        filename: String,
    ) -> Self {
        Self {
            doc_id,
            raw_text,
            entities,
            filename,
            processed_at: Utc::now(),
        }
    }
}
