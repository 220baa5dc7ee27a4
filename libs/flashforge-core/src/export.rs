//! Deck export and import.
//!
//! The exported document is the deck itself: a JSON array of cards with the
//! same field names used everywhere else.

use crate::error::ExportError;
use crate::types::Deck;

/// File name offered for downloaded decks.
pub const EXPORT_FILE_NAME: &str = "flashforge-deck.json";

/// MIME type of an exported deck.
pub const EXPORT_CONTENT_TYPE: &str = "application/json";

/// Serialize a deck to compact JSON.
pub fn to_json(deck: &Deck) -> Result<String, ExportError> {
    Ok(serde_json::to_string(deck)?)
}

/// Parse and validate a previously exported deck.
pub fn from_json(document: &str) -> Result<Deck, ExportError> {
    Ok(serde_json::from_str(document)?)
}
