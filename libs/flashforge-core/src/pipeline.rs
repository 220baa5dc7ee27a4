//! Upload pipeline: validate → read → extract.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{Result, ValidationError};
use crate::extractor::{extract_with_deadline, ExtractorRegistry, Progress};
use crate::source::UploadedFile;
use crate::synthesis::DeckGenerator;
use crate::types::{Deck, DocumentFormat, FileMeta};
use crate::validator::validate;

/// Default time allowed for a single document decode.
pub const DEFAULT_EXTRACT_TIMEOUT: Duration = Duration::from_secs(30);

/// Progress checkpoints reported while a file moves through the pipeline.
pub mod milestones {
    pub const STARTED: u8 = 10;
    pub const VALIDATED: u8 = 30;
    pub const EXTRACTED: u8 = 90;
    pub const DONE: u8 = 100;
}

/// Text pulled out of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub format: DocumentFormat,
    pub text: String,
}

/// Turns uploads into text, and text into decks.
#[derive(Clone)]
pub struct Pipeline {
    extractors: ExtractorRegistry,
    extract_timeout: Duration,
}

impl Pipeline {
    pub fn new(extractors: ExtractorRegistry, extract_timeout: Duration) -> Self {
        Self {
            extractors,
            extract_timeout,
        }
    }

    pub fn extract_timeout(&self) -> Duration {
        self.extract_timeout
    }

    /// Validate and decode an upload.
    pub async fn extract_file(
        &self,
        file: &UploadedFile,
        progress: &Progress,
        cancel: &CancellationToken,
    ) -> Result<Extracted> {
        progress.advance(milestones::STARTED);
        let format = validate(&file.meta)?;
        let extractor = self
            .extractors
            .for_format(format)
            .ok_or_else(|| ValidationError::UnsupportedType {
                mime_type: file.meta.mime_type.clone(),
            })?;
        progress.advance(milestones::VALIDATED);

        let bytes = file.source.read_all().await.map_err(crate::error::ExtractionError::from)?;
        // The declared size is only a claim; hold the bytes to the same limit.
        validate(&FileMeta::new(file.meta.mime_type.clone(), bytes.len() as u64))?;

        tracing::debug!(format = format.name(), size = bytes.len(), "extracting text");
        let text =
            extract_with_deadline(extractor.as_ref(), bytes, progress, self.extract_timeout, cancel)
                .await?;
        progress.advance(milestones::EXTRACTED);

        tracing::info!(format = format.name(), chars = text.chars().count(), "extracted text");
        progress.advance(milestones::DONE);
        Ok(Extracted { format, text })
    }

    /// Decode an upload and hand its text to `generator`.
    pub async fn deck_from_file(
        &self,
        file: &UploadedFile,
        generator: &dyn DeckGenerator,
        progress: &Progress,
        cancel: &CancellationToken,
    ) -> Result<Deck> {
        let extracted = self.extract_file(file, progress, cancel).await?;
        Ok(generator.generate(&extracted.text).await?)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(ExtractorRegistry::default(), DEFAULT_EXTRACT_TIMEOUT)
    }
}
