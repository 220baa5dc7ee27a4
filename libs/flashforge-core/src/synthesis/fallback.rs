//! Deterministic deck synthesis.
//!
//! Emits three fixed baseline cards, one per card type, and two more that
//! quote the input's candidate terms once at least five are available.

use async_trait::async_trait;

use super::{candidate_terms, prepare_input, DeckGenerator};
use crate::error::SynthesisError;
use crate::types::{Deck, Flashcard};

/// Terms required before content-aware cards are added.
const CONTENT_TERMS_REQUIRED: usize = 5;

/// Offline generator backed by [`synthesize`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGenerator;

#[async_trait]
impl DeckGenerator for FallbackGenerator {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn generate(&self, text: &str) -> Result<Deck, SynthesisError> {
        synthesize(text)
    }
}

/// Build a 3- or 5-card deck from notes.
pub fn synthesize(text: &str) -> Result<Deck, SynthesisError> {
    let notes = prepare_input(text)?;
    let terms = candidate_terms(notes);

    let mut cards = baseline_cards()?;
    if terms.len() >= CONTENT_TERMS_REQUIRED {
        cards.extend(content_cards(&terms)?);
    }

    tracing::debug!(terms = terms.len(), cards = cards.len(), "synthesized deck");
    Deck::new(cards)
}

fn baseline_cards() -> Result<Vec<Flashcard>, SynthesisError> {
    Ok(vec![
        Flashcard::basic("card-1", "What is the capital of France?", "Paris")?,
        Flashcard::multiple_choice(
            "card-2",
            "Which of the following is NOT a primary color?",
            "Green is a secondary color formed by mixing blue and yellow.",
            vec!["Red".into(), "Blue".into(), "Green".into(), "Yellow".into()],
            2,
        )?,
        Flashcard::fill_blank(
            "card-3",
            "The process of plants making their own food using sunlight is called _______.",
            "photosynthesis",
        )?,
    ])
}

fn content_cards(terms: &[&str]) -> Result<Vec<Flashcard>, SynthesisError> {
    let (focus, related, options) = (terms[0], terms[1], &terms[2..5]);

    Ok(vec![
        Flashcard::basic(
            "card-4",
            format!("What is the significance of \"{focus}\" in the context of the study material?"),
            format!("\"{focus}\" is an important concept that relates to the main themes discussed in the material."),
        )?,
        Flashcard::multiple_choice(
            "card-5",
            format!("Which of the following terms is most closely related to \"{related}\"?"),
            format!(
                "\"{}\" is most closely related to \"{related}\" as they both address similar concepts.",
                options[0]
            ),
            vec![
                options[0].to_string(),
                options[1].to_string(),
                options[2].to_string(),
                "None of the above".to_string(),
            ],
            0,
        )?,
    ])
}
