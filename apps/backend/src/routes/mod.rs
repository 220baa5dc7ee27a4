pub mod export;
pub mod generate;
pub mod review;
pub mod sessions;
pub mod upload;

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::services::sessions::SessionHandle;
use crate::AppState;

/// Resolve a session id from the path or fail with 404.
pub(crate) async fn session(state: &AppState, id: Uuid) -> Result<Arc<SessionHandle>> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Session {id}")))
}
