//! HTTP client for an external deck generation service.
//!
//! The service receives `{"text": "..."}` and answers with a JSON array of
//! cards in the exported deck format. Timeouts and retries are applied by
//! [`ServiceGenerator`], not here.

use std::sync::Arc;

use async_trait::async_trait;
use flashforge_core::{
    DeckGenerator, FallbackGenerator, GenerationService, RetryPolicy, ServiceError,
    ServiceGenerator,
};
use reqwest::Client;
use serde::Serialize;

use crate::config::GenerationConfig;

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    text: &'a str,
}

/// Posts notes to a configured URL.
pub struct HttpGenerationService {
    client: Client,
    url: String,
}

impl HttpGenerationService {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl GenerationService for HttpGenerationService {
    fn name(&self) -> &str {
        "http"
    }

    async fn request(&self, notes: &str) -> Result<String, ServiceError> {
        let resp = self
            .client
            .post(&self.url)
            .json(&GenerationRequest { text: notes })
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Status { status, message });
        }

        resp.text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))
    }
}

/// Pick the generator for this deployment.
pub fn build_generator(config: Option<&GenerationConfig>) -> Arc<dyn DeckGenerator> {
    match config {
        Some(generation) => {
            tracing::info!(url = %generation.url, "using external generation service");
            let policy = RetryPolicy {
                max_attempts: generation.max_attempts,
                timeout: generation.timeout,
                ..RetryPolicy::default()
            };
            Arc::new(ServiceGenerator::new(
                HttpGenerationService::new(generation.url.clone()),
                policy,
            ))
        }
        None => {
            tracing::info!("no generation service configured, using fallback generator");
            Arc::new(FallbackGenerator)
        }
    }
}
