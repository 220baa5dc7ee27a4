//! Error types for flashforge-core.

use std::time::Duration;
use thiserror::Error;

/// Result type alias using PipelineError.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors raised before a file is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unsupported file type: {mime_type}. Please upload a PDF, DOCX, or TXT file")]
    UnsupportedType { mime_type: String },

    #[error("file is too large ({size_bytes} bytes). Maximum size is {max_bytes} bytes")]
    TooLarge { size_bytes: u64, max_bytes: u64 },
}

/// Errors raised while turning file bytes into text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not decode {format} content: {reason}")]
    DecodeFailed { format: &'static str, reason: String },

    #[error("no text could be extracted from the file. Try another file or paste your notes directly")]
    EmptyContent,

    #[error("extraction timed out after {}s", .0.as_secs())]
    TimedOut(Duration),

    #[error("extraction cancelled")]
    Cancelled,

    #[error("error reading file: {0}")]
    Read(#[from] std::io::Error),
}

/// Errors raised while building a single card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("card {id} has an empty question")]
    EmptyQuestion { id: String },

    #[error("card {id} has an empty answer")]
    EmptyAnswer { id: String },

    #[error("card {id} must have exactly 4 options, found {found}")]
    OptionCount { id: String, found: usize },

    #[error("card {id} has correct option {index} outside 0..{len}")]
    CorrectOptionOutOfRange { id: String, index: usize, len: usize },

    #[error("card {id} is missing its correct option")]
    MissingCorrectOption { id: String },

    #[error("card {id} of type {card_type} must not carry options")]
    StrayOptions { id: String, card_type: &'static str },
}

/// Errors raised while producing a deck.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("please provide some study notes to generate flashcards")]
    EmptyInput,

    #[error("flashcard generation failed: {0}")]
    GenerationFailed(String),

    #[error("no flashcards could be generated from this content")]
    NoCardsProduced,

    #[error("invalid card: {0}")]
    InvalidCard(#[from] CardError),

    #[error("duplicate card id {0}")]
    DuplicateCardId(String),
}

/// Failures reported by an external generation service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// Errors raised while reading or writing an exported deck.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid deck document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Any failure along validate → extract → synthesize.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}
