use std::io::{Cursor, Write};

use shastra::application::ports::{FileLoader, FileLoaderError};
use shastra::domain::DocumentFormat;
use shastra::infrastructure::text_processing::{CompositeFileLoader, DocxAdapter, PdfAdapter};

fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>"))
        .collect();
    let document = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    );

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut buffer);
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(document.as_bytes()).unwrap();
        writer.finish().unwrap();
    }
    buffer.into_inner()
}

#[tokio::test]
async fn given_docx_when_extracting_then_returns_paragraph_text() {
    let data = docx_with_paragraphs(&["RESIDENTIAL LEASE", "Monthly rent: $2,500.00"]);

    let text = DocxAdapter::new()
        .extract_text(&data, DocumentFormat::Docx)
        .await
        .unwrap();

    assert_eq!(text, "RESIDENTIAL LEASE\nMonthly rent: $2,500.00");
}

#[tokio::test]
async fn given_docx_without_text_when_extracting_then_reports_no_text() {
    let data = docx_with_paragraphs(&[" "]);

    let err = DocxAdapter::new()
        .extract_text(&data, DocumentFormat::Docx)
        .await
        .unwrap_err();

    assert!(matches!(err, FileLoaderError::NoTextFound));
}

#[tokio::test]
async fn given_garbage_bytes_when_extracting_pdf_then_extraction_fails() {
    let err = PdfAdapter::new()
        .extract_text(b"not a pdf", DocumentFormat::Pdf)
        .await
        .unwrap_err();

    assert!(matches!(err, FileLoaderError::ExtractionFailed(_)));
}

#[tokio::test]
async fn given_composite_loader_when_docx_sent_then_routes_to_docx_adapter() {
    let data = docx_with_paragraphs(&["Party A and Party B"]);

    let text = CompositeFileLoader::with_default_adapters()
        .extract_text(&data, DocumentFormat::Docx)
        .await
        .unwrap();

    assert_eq!(text, "Party A and Party B");
}

#[tokio::test]
async fn given_empty_composite_loader_when_extracting_then_reports_unsupported_format() {
    let err = CompositeFileLoader::new(vec![])
        .extract_text(b"%PDF", DocumentFormat::Pdf)
        .await
        .unwrap_err();

    assert!(matches!(err, FileLoaderError::UnsupportedFormat(_)));
}

#[tokio::test]
async fn given_pdf_adapter_when_docx_requested_then_reports_unsupported_format() {
    let err = PdfAdapter::new()
        .extract_text(b"", DocumentFormat::Docx)
        .await
        .unwrap_err();

    assert!(matches!(err, FileLoaderError::UnsupportedFormat(_)));
}
