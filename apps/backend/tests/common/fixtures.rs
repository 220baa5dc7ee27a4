//! Test fixtures and factory functions for creating test data.

use axum::body::Bytes;
use serde_json::json;

/// Notes with enough long terms for the content-aware fallback cards.
pub const SAMPLE_NOTES: &str = "Photosynthesis converts light energy into chemical energy. \
Chlorophyll absorbs light. Plants produce glucose and oxygen.";

/// Notes too short to yield five candidate terms.
pub const SHORT_NOTES: &str = "Cells divide.";

/// Create a generate request body.
pub fn generate_request(text: &str) -> serde_json::Value {
    json!({ "text": text })
}

/// Minimal bytes carrying a PDF signature.
pub fn pdf_bytes() -> Bytes {
    Bytes::from_static(b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog >>\nendobj\n%%EOF")
}

/// Minimal bytes carrying a ZIP (DOCX container) signature.
pub fn docx_bytes() -> Bytes {
    Bytes::from_static(b"PK\x03\x04\x14\x00\x06\x00word/document.xml")
}

/// A text body of exactly `len` bytes.
pub fn text_of_len(len: usize) -> Bytes {
    Bytes::from(vec![b'a'; len])
}

/// A deck document in the export format, as an external service would send it.
pub fn service_deck() -> serde_json::Value {
    json!([
        {
            "id": "svc-1",
            "question": "What pigment absorbs light in plants?",
            "answer": "Chlorophyll",
            "type": "basic"
        },
        {
            "id": "svc-2",
            "question": "Which gas do plants release?",
            "answer": "Oxygen is released as a by-product.",
            "type": "multiple-choice",
            "options": ["Nitrogen", "Oxygen", "Helium", "Argon"],
            "correctOption": 1
        }
    ])
}
