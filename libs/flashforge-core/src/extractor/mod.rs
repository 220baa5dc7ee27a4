//! Text extraction from uploaded documents.
//!
//! Each supported [`DocumentFormat`] has a [`TextExtractor`]. Extractors are
//! stateless and may run concurrently; the caller owns timeouts, cancellation
//! and progress via [`extract_with_deadline`].

mod binary;
mod plain;

pub use binary::{DocxExtractor, PdfExtractor};
pub use plain::PlainTextExtractor;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::error::ExtractionError;
use crate::types::DocumentFormat;

/// Converts a file's bytes into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Format this extractor decodes.
    fn format(&self) -> DocumentFormat;

    /// Decode `bytes` into text. Implementations report intermediate progress
    /// and fail with [`ExtractionError::EmptyContent`] when nothing but
    /// whitespace remains.
    async fn extract(&self, bytes: Vec<u8>, progress: &Progress) -> Result<String, ExtractionError>;
}

/// Monotonic 0-100 progress, observable through a watch channel.
#[derive(Debug, Clone)]
pub struct Progress {
    tx: Arc<watch::Sender<u8>>,
}

impl Progress {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Move progress forward. Values below the current one are ignored.
    pub fn advance(&self, value: u8) {
        let value = value.min(100);
        self.tx.send_if_modified(|current| {
            if value > *current {
                *current = value;
                true
            } else {
                false
            }
        });
    }

    pub fn current(&self) -> u8 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.tx.subscribe()
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

/// Lookup from format to extractor.
#[derive(Clone)]
pub struct ExtractorRegistry {
    extractors: HashMap<DocumentFormat, Arc<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// Registry with no extractors.
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Add or replace the extractor for its format.
    pub fn register(mut self, extractor: impl TextExtractor + 'static) -> Self {
        self.extractors.insert(extractor.format(), Arc::new(extractor));
        self
    }

    pub fn for_format(&self, format: DocumentFormat) -> Option<Arc<dyn TextExtractor>> {
        self.extractors.get(&format).cloned()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::empty()
            .register(PlainTextExtractor)
            .register(PdfExtractor)
            .register(DocxExtractor)
    }
}

/// Run an extractor under a timeout, aborting early when `cancel` fires.
pub async fn extract_with_deadline(
    extractor: &dyn TextExtractor,
    bytes: Vec<u8>,
    progress: &Progress,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<String, ExtractionError> {
    let work = tokio::time::timeout(timeout, extractor.extract(bytes, progress));

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!(format = extractor.format().name(), "extraction cancelled");
            Err(ExtractionError::Cancelled)
        }
        result = work => match result {
            Ok(text) => text,
            Err(_) => {
                tracing::warn!(
                    format = extractor.format().name(),
                    timeout_secs = timeout.as_secs(),
                    "extraction timed out"
                );
                Err(ExtractionError::TimedOut(timeout))
            }
        },
    }
}

/// Reject text that is blank once trimmed.
fn require_content(text: String) -> Result<String, ExtractionError> {
    if text.trim().is_empty() {
        Err(ExtractionError::EmptyContent)
    } else {
        Ok(text)
    }
}
