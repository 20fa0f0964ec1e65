use std::io::{Cursor, Read};
use std::time::Duration;

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::DocumentFormat;

use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);
const DOCUMENT_PART: &str = "word/document.xml";
const MAX_DOCUMENT_PART_BYTES: u64 = 64 * 1024 * 1024;

/// Reads the main document part of a DOCX package and keeps the text runs,
/// one line per paragraph.
#[derive(Default)]
pub struct DocxAdapter;

impl DocxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read_document_part(data: &[u8]) -> Result<Vec<u8>, FileLoaderError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data))
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("invalid DOCX package: {e}")))?;

        let entry = archive.by_name(DOCUMENT_PART).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("{DOCUMENT_PART} not readable: {e}"))
        })?;

        let mut xml = Vec::new();
        entry
            .take(MAX_DOCUMENT_PART_BYTES)
            .read_to_end(&mut xml)
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))?;

        if xml.len() as u64 >= MAX_DOCUMENT_PART_BYTES {
            return Err(FileLoaderError::ExtractionFailed(format!(
                "{DOCUMENT_PART} exceeds size limit"
            )));
        }

        Ok(xml)
    }

    fn paragraphs(xml: &[u8]) -> Result<String, FileLoaderError> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut out = String::new();
        let mut in_text_run = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text_run = true,
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"t" => in_text_run = false,
                    b"p" => out.push('\n'),
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                    b"tab" => out.push('\t'),
                    b"br" => out.push('\n'),
                    _ => {}
                },
                Ok(Event::Text(text)) if in_text_run => {
                    let text = text
                        .unescape()
                        .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))?;
                    out.push_str(&text);
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(FileLoaderError::ExtractionFailed(format!(
                        "malformed document XML: {e}"
                    )));
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(out)
    }

    fn extract(data: &[u8]) -> Result<String, FileLoaderError> {
        let xml = Self::read_document_part(data)?;
        Self::paragraphs(&xml)
    }
}

#[async_trait]
impl FileLoader for DocxAdapter {
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    async fn extract_text(
        &self,
        data: &[u8],
        format: DocumentFormat,
    ) -> Result<String, FileLoaderError> {
        if format != DocumentFormat::Docx {
            return Err(FileLoaderError::UnsupportedFormat(format.extension().to_string()));
        }

        let bytes = data.to_vec();
        let raw = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract(&bytes)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("DOCX extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        let text = sanitize_extracted_text(&raw);
        tracing::info!(chars = text.chars().count(), "DOCX text extraction complete");

        if text.is_empty() {
            return Err(FileLoaderError::NoTextFound);
        }

        Ok(text)
    }
}
