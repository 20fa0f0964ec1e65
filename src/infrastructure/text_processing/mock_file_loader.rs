use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::DocumentFormat;

/// Treats uploaded bytes as UTF-8 text regardless of format.
pub struct MockFileLoader;

#[async_trait::async_trait]
impl FileLoader for MockFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        _format: DocumentFormat,
    ) -> Result<String, FileLoaderError> {
        String::from_utf8(data.to_vec())
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))
    }
}
