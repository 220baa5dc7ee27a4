//! Core types for the flashcard pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{CardError, SynthesisError};

/// MIME type for plain text uploads.
pub const MIME_TEXT: &str = "text/plain";
/// MIME type for PDF uploads.
pub const MIME_PDF: &str = "application/pdf";
/// MIME type for DOCX uploads.
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Number of options carried by every multiple-choice card.
pub const OPTION_COUNT: usize = 4;

/// Flashcard type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardType {
    Basic,
    MultipleChoice,
    FillBlank,
}

impl CardType {
    /// Wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::MultipleChoice => "multiple-choice",
            Self::FillBlank => "fill-blank",
        }
    }

    /// Human-readable label shown on the card face.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::MultipleChoice => "Multiple Choice",
            Self::FillBlank => "Fill in the Blank",
        }
    }
}

/// Type-specific part of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardKind {
    Basic,
    MultipleChoice {
        options: [String; OPTION_COUNT],
        correct_option: usize,
    },
    FillBlank,
}

impl CardKind {
    pub fn card_type(&self) -> CardType {
        match self {
            Self::Basic => CardType::Basic,
            Self::MultipleChoice { .. } => CardType::MultipleChoice,
            Self::FillBlank => CardType::FillBlank,
        }
    }
}

/// A single question/answer unit. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFlashcard", into = "RawFlashcard")]
pub struct Flashcard {
    id: String,
    question: String,
    answer: String,
    kind: CardKind,
}

impl Flashcard {
    /// Build a basic question/answer card.
    pub fn basic(
        id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, CardError> {
        Self::build(id.into(), question.into(), answer.into(), CardKind::Basic)
    }

    /// Build a fill-in-the-blank card.
    pub fn fill_blank(
        id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, CardError> {
        Self::build(id.into(), question.into(), answer.into(), CardKind::FillBlank)
    }

    /// Build a multiple-choice card. `options` must hold exactly four entries
    /// and `correct_option` must index into them.
    pub fn multiple_choice(
        id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        options: Vec<String>,
        correct_option: usize,
    ) -> Result<Self, CardError> {
        let id = id.into();
        let found = options.len();
        let options: [String; OPTION_COUNT] = options
            .try_into()
            .map_err(|_| CardError::OptionCount { id: id.clone(), found })?;
        if correct_option >= OPTION_COUNT {
            return Err(CardError::CorrectOptionOutOfRange {
                id,
                index: correct_option,
                len: OPTION_COUNT,
            });
        }
        Self::build(
            id,
            question.into(),
            answer.into(),
            CardKind::MultipleChoice {
                options,
                correct_option,
            },
        )
    }

    fn build(id: String, question: String, answer: String, kind: CardKind) -> Result<Self, CardError> {
        if question.trim().is_empty() {
            return Err(CardError::EmptyQuestion { id });
        }
        if answer.trim().is_empty() {
            return Err(CardError::EmptyAnswer { id });
        }
        Ok(Self {
            id,
            question,
            answer,
            kind,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn kind(&self) -> &CardKind {
        &self.kind
    }

    pub fn card_type(&self) -> CardType {
        self.kind.card_type()
    }

    /// Options of a multiple-choice card, `None` for every other type.
    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            CardKind::MultipleChoice { options, .. } => Some(options.as_slice()),
            _ => None,
        }
    }

    /// Index of the correct option, `None` unless multiple-choice.
    pub fn correct_option(&self) -> Option<usize> {
        match &self.kind {
            CardKind::MultipleChoice { correct_option, .. } => Some(*correct_option),
            _ => None,
        }
    }
}

/// Card exactly as it appears in exported JSON and generation responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFlashcard {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_option: Option<usize>,
}

impl TryFrom<RawFlashcard> for Flashcard {
    type Error = CardError;

    fn try_from(raw: RawFlashcard) -> Result<Self, Self::Error> {
        match raw.card_type {
            CardType::MultipleChoice => {
                let options = raw.options.unwrap_or_default();
                let correct_option = raw
                    .correct_option
                    .ok_or_else(|| CardError::MissingCorrectOption { id: raw.id.clone() })?;
                Self::multiple_choice(raw.id, raw.question, raw.answer, options, correct_option)
            }
            other => {
                if raw.options.is_some() || raw.correct_option.is_some() {
                    return Err(CardError::StrayOptions {
                        id: raw.id,
                        card_type: other.as_str(),
                    });
                }
                if other == CardType::Basic {
                    Self::basic(raw.id, raw.question, raw.answer)
                } else {
                    Self::fill_blank(raw.id, raw.question, raw.answer)
                }
            }
        }
    }
}

impl From<Flashcard> for RawFlashcard {
    fn from(card: Flashcard) -> Self {
        let card_type = card.card_type();
        let (options, correct_option) = match card.kind {
            CardKind::MultipleChoice {
                options,
                correct_option,
            } => (Some(options.into()), Some(correct_option)),
            _ => (None, None),
        };
        Self {
            id: card.id,
            question: card.question,
            answer: card.answer,
            card_type,
            options,
            correct_option,
        }
    }
}

/// Ordered, non-empty set of cards produced by one synthesis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Flashcard>", into = "Vec<Flashcard>")]
pub struct Deck {
    cards: Vec<Flashcard>,
}

impl Deck {
    /// Wrap cards into a deck. Fails on an empty list or a repeated id.
    pub fn new(cards: Vec<Flashcard>) -> Result<Self, SynthesisError> {
        if cards.is_empty() {
            return Err(SynthesisError::NoCardsProduced);
        }
        let mut seen = std::collections::HashSet::new();
        for card in &cards {
            if !seen.insert(card.id()) {
                return Err(SynthesisError::DuplicateCardId(card.id().to_string()));
            }
        }
        Ok(Self { cards })
    }

    /// Number of cards, always at least one.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn get(&self, index: usize) -> Option<&Flashcard> {
        self.cards.get(index)
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Flashcard> {
        self.cards.iter()
    }
}

impl TryFrom<Vec<Flashcard>> for Deck {
    type Error = SynthesisError;

    fn try_from(cards: Vec<Flashcard>) -> Result<Self, Self::Error> {
        Self::new(cards)
    }
}

impl From<Deck> for Vec<Flashcard> {
    fn from(deck: Deck) -> Self {
        deck.cards
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Flashcard;
    type IntoIter = std::slice::Iter<'a, Flashcard>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolve a MIME type to a format.
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        match mime_type {
            MIME_TEXT => Some(Self::PlainText),
            MIME_PDF => Some(Self::Pdf),
            MIME_DOCX => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::PlainText => MIME_TEXT,
            Self::Pdf => MIME_PDF,
            Self::Docx => MIME_DOCX,
        }
    }

    /// Short name used in messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlainText => "TXT",
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
        }
    }
}

/// Metadata the upload surface reports for a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    pub mime_type: String,
    pub size_bytes: u64,
}

impl FileMeta {
    pub fn new(mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            mime_type: mime_type.into(),
            size_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options() -> Vec<String> {
        ["Red", "Blue", "Green", "Yellow"].map(String::from).to_vec()
    }

    #[test]
    fn multiple_choice_requires_four_options() {
        let result = Flashcard::multiple_choice("c1", "Q", "A", options()[..3].to_vec(), 0);
        assert!(matches!(result, Err(CardError::OptionCount { found: 3, .. })));
    }

    #[test]
    fn multiple_choice_rejects_out_of_range_answer() {
        let result = Flashcard::multiple_choice("c1", "Q", "A", options(), 4);
        assert!(matches!(result, Err(CardError::CorrectOptionOutOfRange { index: 4, .. })));
    }

    #[test]
    fn blank_question_rejected() {
        let result = Flashcard::basic("c1", "   ", "A");
        assert!(matches!(result, Err(CardError::EmptyQuestion { .. })));
    }

    #[test]
    fn basic_card_serializes_without_options() {
        let card = Flashcard::basic("card-1", "What is the capital of France?", "Paris").unwrap();
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "card-1",
                "question": "What is the capital of France?",
                "answer": "Paris",
                "type": "basic"
            })
        );
    }

    #[test]
    fn multiple_choice_serializes_camel_case() {
        let card = Flashcard::multiple_choice("card-2", "Q", "A", options(), 2).unwrap();
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["type"], "multiple-choice");
        assert_eq!(json["options"].as_array().unwrap().len(), 4);
        assert_eq!(json["correctOption"], 2);
    }

    #[test]
    fn basic_card_with_options_is_rejected_on_parse() {
        let json = r#"{"id":"x","question":"Q","answer":"A","type":"basic","options":["a","b","c","d"]}"#;
        let result: Result<Flashcard, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn multiple_choice_without_correct_option_is_rejected() {
        let json = r#"{"id":"x","question":"Q","answer":"A","type":"multiple-choice","options":["a","b","c","d"]}"#;
        let result: Result<Flashcard, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn empty_deck_is_rejected() {
        assert!(matches!(Deck::new(vec![]), Err(SynthesisError::NoCardsProduced)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let a = Flashcard::basic("same", "Q1", "A1").unwrap();
        let b = Flashcard::fill_blank("same", "Q2", "A2").unwrap();
        assert!(matches!(Deck::new(vec![a, b]), Err(SynthesisError::DuplicateCardId(id)) if id == "same"));
    }

    #[test]
    fn format_from_mime() {
        assert_eq!(DocumentFormat::from_mime(MIME_TEXT), Some(DocumentFormat::PlainText));
        assert_eq!(DocumentFormat::from_mime(MIME_PDF), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_mime(MIME_DOCX), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::from_mime("image/png"), None);
    }
}
