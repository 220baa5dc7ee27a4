//! Deck review state machine.
//!
//! Navigation is cyclic and always lands on the question side. Loading a deck
//! resets to the first card.

use serde::{Deserialize, Serialize};

use crate::types::{CardType, Deck, Flashcard};

/// Position within the loaded deck and which side is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigatorState {
    pub index: usize,
    pub flipped: bool,
}

/// Steps through one deck for one review session.
#[derive(Debug, Clone, Default)]
pub struct DeckNavigator {
    deck: Option<Deck>,
    state: NavigatorState,
}

impl DeckNavigator {
    /// Navigator with no deck loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the deck and return to `(0, false)`.
    pub fn load(&mut self, deck: Deck) {
        self.deck = Some(deck);
        self.state = NavigatorState::default();
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn state(&self) -> NavigatorState {
        self.state
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.deck.as_ref()?.get(self.state.index)
    }

    /// Advance one card, wrapping past the end.
    pub fn next(&mut self) {
        if let Some(len) = self.len() {
            self.state = NavigatorState {
                index: (self.state.index + 1) % len,
                flipped: false,
            };
        }
    }

    /// Go back one card, wrapping before the start.
    pub fn previous(&mut self) {
        if let Some(len) = self.len() {
            self.state = NavigatorState {
                index: (self.state.index + len - 1) % len,
                flipped: false,
            };
        }
    }

    /// Toggle between question and answer.
    pub fn flip(&mut self) {
        if self.deck.is_some() {
            self.state.flipped = !self.state.flipped;
        }
    }

    /// Render the current card according to the flip state.
    pub fn view(&self) -> Option<CardView> {
        self.current()
            .map(|card| CardView::render(card, self.state, self.deck.as_ref().map_or(0, Deck::len)))
    }

    fn len(&self) -> Option<usize> {
        self.deck.as_ref().map(Deck::len)
    }
}

/// Letter for an option position: 0 → A, 1 → B, ...
pub fn option_letter(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}

/// A multiple-choice option with its display letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledOption {
    pub label: char,
    pub text: String,
}

/// What the review surface shows for the current card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "side", rename_all = "snake_case")]
pub enum Face {
    Question {
        text: String,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        options: Vec<LabeledOption>,
    },
    Answer {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        correct_option: Option<char>,
    },
}

/// Rendered card plus its position in the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: String,
    /// 1-based position.
    pub position: usize,
    pub total: usize,
    pub card_type: CardType,
    pub type_label: String,
    pub face: Face,
}

impl CardView {
    pub fn render(card: &Flashcard, state: NavigatorState, total: usize) -> Self {
        let face = if state.flipped {
            Face::Answer {
                text: card.answer().to_string(),
                correct_option: card.correct_option().map(option_letter),
            }
        } else {
            Face::Question {
                text: card.question().to_string(),
                options: card
                    .options()
                    .unwrap_or_default()
                    .iter()
                    .enumerate()
                    .map(|(i, text)| LabeledOption {
                        label: option_letter(i),
                        text: text.clone(),
                    })
                    .collect(),
            }
        };

        Self {
            id: card.id().to_string(),
            position: state.index + 1,
            total,
            card_type: card.card_type(),
            type_label: card.card_type().label().to_string(),
            face,
        }
    }
}
