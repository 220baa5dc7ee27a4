//! Document upload endpoints

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        HeaderMap, StatusCode,
    },
    Json,
};
use flashforge_core::{UploadedFile, ValidationError, MAX_FILE_BYTES};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{UploadProgressResponse, UploadResponse};
use crate::services::sessions::SessionHandle;
use crate::AppState;

/// Holds the session's upload slot; releases it when the request ends,
/// including when the client goes away mid-upload.
struct UploadSlot(Arc<SessionHandle>);

impl Drop for UploadSlot {
    fn drop(&mut self) {
        match self.0.session.try_lock() {
            Ok(mut session) => session.finish_upload(),
            Err(_) => {
                let handle = self.0.clone();
                tokio::spawn(async move {
                    handle.session.lock().await.finish_upload();
                });
            }
        }
    }
}

/// POST /api/sessions/:id/upload
/// Body is the raw file; Content-Type carries its MIME type.
pub async fn upload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<UploadResponse>> {
    let body = body.map_err(|rejection| body_error(&headers, rejection))?;

    let mime_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
        .ok_or_else(|| ApiError::BadRequest("Missing Content-Type header".to_string()))?;

    let handle = super::session(&state, id).await?;
    let progress = handle.session.lock().await.begin_upload()?;
    let _slot = UploadSlot(handle.clone());

    let cancel = CancellationToken::new();
    let _cancel_on_drop = cancel.clone().drop_guard();

    tracing::info!(session_id = %id, mime_type = %mime_type, size = body.len(), "processing upload");
    let file = UploadedFile::from_bytes(mime_type, body.to_vec());
    let extracted = state.pipeline.extract_file(&file, &progress, &cancel).await?;

    Ok(Json(UploadResponse {
        text: extracted.text,
        format: extracted.format,
        progress: progress.current(),
    }))
}

/// GET /api/sessions/:id/upload/progress
pub async fn progress(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UploadProgressResponse>> {
    let handle = super::session(&state, id).await?;
    let session = handle.session.lock().await;
    Ok(Json(UploadProgressResponse {
        in_flight: session.upload_in_flight(),
        progress: session.upload_progress(),
    }))
}

/// Bodies over the router's limit never reach the validator; report them the
/// same way it would.
fn body_error(headers: &HeaderMap, rejection: BytesRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let size_bytes = headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(MAX_FILE_BYTES + 1);
        ValidationError::TooLarge {
            size_bytes,
            max_bytes: MAX_FILE_BYTES,
        }
        .into()
    } else {
        ApiError::BadRequest(rejection.body_text())
    }
}
