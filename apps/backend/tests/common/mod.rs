//! Common test utilities and fixtures for integration tests.
//!
//! Everything runs in-process: sessions live in memory and the default
//! generator is the deterministic fallback, so no external services are needed.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use uuid::Uuid;

use flashforge_backend::services::sessions::SessionStore;
use flashforge_backend::{router, AppState};
use flashforge_core::{
    synthesize, Deck, DeckGenerator, ExtractorRegistry, FallbackGenerator, Pipeline,
    SynthesisError,
};

/// Test context holding the shared state behind a router.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Context backed by the fallback generator.
    pub fn new() -> Self {
        Self::with_generator(Arc::new(FallbackGenerator))
    }

    /// Context backed by a custom generator.
    pub fn with_generator(generator: Arc<dyn DeckGenerator>) -> Self {
        Self::with_parts(
            generator,
            Pipeline::new(ExtractorRegistry::default(), Duration::from_secs(5)),
        )
    }

    /// Context backed by a custom extraction pipeline.
    pub fn with_pipeline(pipeline: Pipeline) -> Self {
        Self::with_parts(Arc::new(FallbackGenerator), pipeline)
    }

    fn with_parts(generator: Arc<dyn DeckGenerator>, pipeline: Pipeline) -> Self {
        let state = AppState::new(
            SessionStore::new(Duration::from_secs(3600)),
            pipeline,
            generator,
        );
        let app = router(state.clone());
        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Open a session through the API and return its id.
    pub async fn create_session(server: &TestServer) -> Uuid {
        let response = server.post("/api/sessions").await;
        let body: serde_json::Value = response.json();
        body["session_id"].as_str().unwrap().parse().unwrap()
    }

    /// Open a session and generate the fallback deck for the sample notes.
    pub async fn session_with_deck(server: &TestServer) -> Uuid {
        let id = Self::create_session(server).await;
        server
            .post(&format!("/api/sessions/{id}/generate"))
            .json(&fixtures::generate_request(fixtures::SAMPLE_NOTES))
            .await
            .assert_status_ok();
        id
    }
}

/// Generator that takes a while, then answers like the fallback.
pub struct SlowGenerator(pub Duration);

#[async_trait]
impl DeckGenerator for SlowGenerator {
    fn name(&self) -> &str {
        "slow"
    }

    async fn generate(&self, text: &str) -> Result<Deck, SynthesisError> {
        tokio::time::sleep(self.0).await;
        synthesize(text)
    }
}

/// Generator that always fails the way an unreachable service would.
pub struct FailingGenerator;

#[async_trait]
impl DeckGenerator for FailingGenerator {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _text: &str) -> Result<Deck, SynthesisError> {
        Err(SynthesisError::GenerationFailed(
            "failing gave up after 2 attempt(s): connection refused".to_string(),
        ))
    }
}
