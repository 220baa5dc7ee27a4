//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flashforge_core::{
    ExportError, ExtractionError, PipelineError, SessionError, SynthesisError, ValidationError,
};
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Validation(e) => Self::Validation(e),
            PipelineError::Extraction(e) => Self::Extraction(e),
            PipelineError::Synthesis(e) => Self::Synthesis(e),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::UploadInFlight => Self::Conflict(e.to_string()),
            SessionError::NoDeck => Self::NotFound(e.to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        Self::Internal(e.to_string())
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(ValidationError::UnsupportedType { .. }) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_type")
            }
            ApiError::Validation(ValidationError::TooLarge { .. }) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "too_large")
            }
            ApiError::Extraction(ExtractionError::DecodeFailed { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "decode_failed")
            }
            ApiError::Extraction(ExtractionError::EmptyContent) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "empty_content")
            }
            ApiError::Extraction(ExtractionError::TimedOut(_)) => {
                (StatusCode::GATEWAY_TIMEOUT, "extraction_timeout")
            }
            ApiError::Extraction(ExtractionError::Cancelled) => {
                (StatusCode::SERVICE_UNAVAILABLE, "extraction_cancelled")
            }
            ApiError::Extraction(ExtractionError::Read(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "read_error")
            }
            ApiError::Synthesis(SynthesisError::EmptyInput) => {
                (StatusCode::BAD_REQUEST, "empty_input")
            }
            ApiError::Synthesis(SynthesisError::GenerationFailed(_)) => {
                (StatusCode::BAD_GATEWAY, "generation_failed")
            }
            ApiError::Synthesis(SynthesisError::InvalidCard(_))
            | ApiError::Synthesis(SynthesisError::DuplicateCardId(_)) => {
                (StatusCode::BAD_GATEWAY, "invalid_generation")
            }
            ApiError::Synthesis(SynthesisError::NoCardsProduced) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "no_cards_produced")
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_kind();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
