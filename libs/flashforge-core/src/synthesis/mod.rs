//! Flashcard synthesis.
//!
//! A [`DeckGenerator`] turns study notes into a [`Deck`]. Two strategies share
//! the same output contract:
//! - [`FallbackGenerator`]: deterministic, offline, always 3 or 5 cards
//! - [`ServiceGenerator`]: an external [`GenerationService`] with timeout and
//!   bounded retries

mod fallback;
mod service;

pub use fallback::{synthesize, FallbackGenerator};
pub use service::{GenerationService, RetryPolicy, ServiceGenerator};

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::SynthesisError;
use crate::types::Deck;

/// Notes beyond this many characters are dropped before synthesis.
pub const MAX_INPUT_CHARS: usize = 10_000;

/// Tokens must be longer than this to count as candidate terms.
pub const MIN_TERM_CHARS: usize = 4;

/// Upper bound on candidate terms kept from one input.
pub const MAX_TERMS: usize = 20;

/// Strategy for producing a deck from notes.
#[async_trait]
pub trait DeckGenerator: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    /// Produce a deck, or fail without side effects.
    async fn generate(&self, text: &str) -> Result<Deck, SynthesisError>;
}

/// Reject blank notes and cut the rest down to [`MAX_INPUT_CHARS`].
pub fn prepare_input(text: &str) -> Result<&str, SynthesisError> {
    if text.trim().is_empty() {
        return Err(SynthesisError::EmptyInput);
    }
    Ok(truncate_chars(text, MAX_INPUT_CHARS))
}

/// First `max` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Whitespace-separated tokens longer than [`MIN_TERM_CHARS`], deduplicated in
/// first-seen order, at most [`MAX_TERMS`] of them.
pub fn candidate_terms(text: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    text.split_whitespace()
        .filter(|token| token.chars().count() > MIN_TERM_CHARS)
        .filter(|token| seen.insert(*token))
        .take(MAX_TERMS)
        .collect()
}
