//! API request and response types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from flashforge-core
pub use flashforge_core::{CardView, Deck, DocumentFormat, Face, NavigatorState};

// Session types
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

// Upload types
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub text: String,
    pub format: DocumentFormat,
    pub progress: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadProgressResponse {
    pub in_flight: bool,
    /// `None` until the session's first upload starts.
    pub progress: Option<u8>,
}

// Generation types
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub count: usize,
    pub cards: Deck,
    pub state: NavigatorState,
    pub view: CardView,
}

// Review types
#[derive(Debug, Serialize, Deserialize)]
pub struct CardResponse {
    pub state: NavigatorState,
    pub view: CardView,
}
