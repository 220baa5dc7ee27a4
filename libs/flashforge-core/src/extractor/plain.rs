//! Plain text decoding.

use async_trait::async_trait;

use super::{require_content, Progress, TextExtractor};
use crate::error::ExtractionError;
use crate::types::DocumentFormat;

/// Decodes UTF-8 text files without altering a single byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::PlainText
    }

    async fn extract(&self, bytes: Vec<u8>, progress: &Progress) -> Result<String, ExtractionError> {
        let text = String::from_utf8(bytes).map_err(|e| ExtractionError::DecodeFailed {
            format: DocumentFormat::PlainText.name(),
            reason: e.utf8_error().to_string(),
        })?;
        progress.advance(80);
        require_content(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn utf8_round_trips_byte_for_byte() {
        let input = "Zellatmung\r\n  findet in den Mitochondrien statt. \u{1F331}\n\tEnde";
        let text = PlainTextExtractor
            .extract(input.as_bytes().to_vec(), &Progress::new())
            .await
            .unwrap();
        assert_eq!(text.as_bytes(), input.as_bytes());
    }

    #[tokio::test]
    async fn invalid_utf8_fails_to_decode() {
        let result = PlainTextExtractor
            .extract(vec![0x66, 0x6f, 0xff, 0xfe], &Progress::new())
            .await;
        assert!(matches!(result, Err(ExtractionError::DecodeFailed { format: "TXT", .. })));
    }

    #[tokio::test]
    async fn whitespace_only_is_empty_content() {
        let result = PlainTextExtractor
            .extract(b" \n\t  ".to_vec(), &Progress::new())
            .await;
        assert!(matches!(result, Err(ExtractionError::EmptyContent)));
    }
}
