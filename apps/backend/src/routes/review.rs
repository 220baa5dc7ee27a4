//! Review endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use flashforge_core::{ReviewAction, SessionError};
use uuid::Uuid;

use crate::error::Result;
use crate::models::CardResponse;
use crate::AppState;

/// GET /api/sessions/:id/card
pub async fn current(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<CardResponse>> {
    let handle = super::session(&state, id).await?;
    let session = handle.session.lock().await;
    let view = session.view().ok_or(SessionError::NoDeck)?;
    Ok(Json(CardResponse {
        state: session.state(),
        view,
    }))
}

/// POST /api/sessions/:id/next
pub async fn next(state: State<AppState>, id: Path<Uuid>) -> Result<Json<CardResponse>> {
    apply(state, id, ReviewAction::Next).await
}

/// POST /api/sessions/:id/previous
pub async fn previous(state: State<AppState>, id: Path<Uuid>) -> Result<Json<CardResponse>> {
    apply(state, id, ReviewAction::Previous).await
}

/// POST /api/sessions/:id/flip
pub async fn flip(state: State<AppState>, id: Path<Uuid>) -> Result<Json<CardResponse>> {
    apply(state, id, ReviewAction::Flip).await
}

async fn apply(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    action: ReviewAction,
) -> Result<Json<CardResponse>> {
    let handle = super::session(&state, id).await?;
    let mut session = handle.session.lock().await;
    let view = session.apply(action)?;
    Ok(Json(CardResponse {
        state: session.state(),
        view,
    }))
}
