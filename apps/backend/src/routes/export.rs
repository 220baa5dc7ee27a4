//! Deck download endpoint

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use flashforge_core::export::{self, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};
use flashforge_core::SessionError;
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

/// GET /api/sessions/:id/export
pub async fn download(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<impl IntoResponse> {
    let handle = super::session(&state, id).await?;
    let session = handle.session.lock().await;
    let deck = session.deck().ok_or(SessionError::NoDeck)?;
    let body = export::to_json(deck)?;

    Ok((
        [
            (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        body,
    ))
}
