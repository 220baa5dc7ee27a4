//! Deck generation endpoint

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{GenerateRequest, GenerateResponse};
use crate::AppState;

/// POST /api/sessions/:id/generate
/// Replaces the session's deck; a failure leaves the old deck in place.
/// The session stays unlocked while the generator runs so the current deck
/// can still be reviewed.
pub async fn generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    let handle = super::session(&state, id).await?;
    let cards = state.generator.generate(&payload.text).await?;

    let mut session = handle.session.lock().await;
    session.load(cards.clone());
    let view = session
        .view()
        .ok_or_else(|| ApiError::Internal("loaded deck has no current card".to_string()))?;

    tracing::info!(session_id = %id, count = cards.len(), "generated deck");

    Ok(Json(GenerateResponse {
        count: cards.len(),
        cards,
        state: session.state(),
        view,
    }))
}
