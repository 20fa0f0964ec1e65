use async_trait::async_trait;

use crate::domain::DocumentFormat;

#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_text(
        &self,
        data: &[u8],
        format: DocumentFormat,
    ) -> Result<String, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to extract text: {0}")]
    ExtractionFailed(String),
    #[error("No text content found in the document")]
    NoTextFound,
}
