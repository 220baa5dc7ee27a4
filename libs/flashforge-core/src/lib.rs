//! Core flashcard library for FlashForge.
//!
//! Provides:
//! - Upload validation and format-specific text extraction
//! - Flashcard synthesis (deterministic fallback or an external service)
//! - Deck review navigation and card rendering
//! - Deck export as JSON
//! - Shared types (Flashcard, Deck, DocumentFormat, etc.)

pub mod error;
pub mod export;
pub mod extractor;
pub mod navigator;
pub mod pipeline;
pub mod session;
pub mod source;
pub mod synthesis;
pub mod types;
pub mod validator;

pub use error::{
    CardError, ExportError, ExtractionError, PipelineError, Result, ServiceError, SynthesisError,
    ValidationError,
};
pub use extractor::{ExtractorRegistry, Progress, TextExtractor};
pub use navigator::{CardView, DeckNavigator, Face, NavigatorState};
pub use pipeline::{Extracted, Pipeline};
pub use session::{ReviewAction, Session, SessionError};
pub use source::{ByteSource, MemorySource, UploadedFile};
pub use synthesis::{
    synthesize, DeckGenerator, FallbackGenerator, GenerationService, RetryPolicy, ServiceGenerator,
};
pub use types::{CardKind, CardType, Deck, DocumentFormat, FileMeta, Flashcard, RawFlashcard};
pub use validator::{validate, MAX_FILE_BYTES};
