//! Reference decoders for binary document formats.
//!
//! These verify the container signature and then hand back a fixed rendering
//! of the document. A real decoder replaces the body of [`decode`] and keeps
//! the same contract: reading-order plain text with layout stripped.

use async_trait::async_trait;

use super::{require_content, Progress, TextExtractor};
use crate::error::ExtractionError;
use crate::types::DocumentFormat;

const PDF_SIGNATURE: &[u8] = b"%PDF-";
const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";

/// PDF documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

/// Word (DOCX) documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

#[async_trait]
impl TextExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    async fn extract(&self, bytes: Vec<u8>, progress: &Progress) -> Result<String, ExtractionError> {
        decode_off_thread(DocumentFormat::Pdf, bytes, progress).await
    }
}

#[async_trait]
impl TextExtractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    async fn extract(&self, bytes: Vec<u8>, progress: &Progress) -> Result<String, ExtractionError> {
        decode_off_thread(DocumentFormat::Docx, bytes, progress).await
    }
}

async fn decode_off_thread(
    format: DocumentFormat,
    bytes: Vec<u8>,
    progress: &Progress,
) -> Result<String, ExtractionError> {
    tracing::debug!(format = format.name(), size = bytes.len(), "decoding document");
    progress.advance(40);

    let text = tokio::task::spawn_blocking(move || decode(format, &bytes))
        .await
        .map_err(|e| ExtractionError::DecodeFailed {
            format: format.name(),
            reason: e.to_string(),
        })??;

    progress.advance(80);
    require_content(text)
}

fn decode(format: DocumentFormat, bytes: &[u8]) -> Result<String, ExtractionError> {
    let (signature, what) = match format {
        DocumentFormat::Pdf => (PDF_SIGNATURE, "missing %PDF- header"),
        DocumentFormat::Docx => (ZIP_SIGNATURE, "not a ZIP container"),
        DocumentFormat::PlainText => {
            return Err(ExtractionError::DecodeFailed {
                format: format.name(),
                reason: "not a binary document format".to_string(),
            })
        }
    };

    if !bytes.starts_with(signature) {
        return Err(ExtractionError::DecodeFailed {
            format: format.name(),
            reason: what.to_string(),
        });
    }

    Ok(format!(
        "This is the extracted text from your {} document. In a real application, we would use a proper {} parsing library to extract the actual text content from your document.",
        format.name(),
        format.name()
    ))
}
