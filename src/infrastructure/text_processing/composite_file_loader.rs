use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::DocumentFormat;

use super::{DocxAdapter, PdfAdapter};

pub struct CompositeFileLoader {
    adapters: HashMap<DocumentFormat, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(DocumentFormat, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// PDF and DOCX adapters.
    pub fn with_default_adapters() -> Self {
        Self::new(vec![
            (DocumentFormat::Pdf, Arc::new(PdfAdapter::new())),
            (DocumentFormat::Docx, Arc::new(DocxAdapter::new())),
        ])
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        format: DocumentFormat,
    ) -> Result<String, FileLoaderError> {
        let adapter = self.adapters.get(&format).ok_or_else(|| {
            FileLoaderError::UnsupportedFormat(format.extension().to_string())
        })?;

        adapter.extract_text(data, format).await
    }
}
