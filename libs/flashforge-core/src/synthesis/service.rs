//! Generation through an external service.

use std::time::Duration;

use async_trait::async_trait;

use super::{prepare_input, DeckGenerator};
use crate::error::{ServiceError, SynthesisError};
use crate::types::{Deck, Flashcard};

/// External service that turns notes into a JSON array of cards.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Identifier used in logs and error messages.
    fn name(&self) -> &str;

    /// Send notes, returning the raw response body.
    async fn request(&self, notes: &str) -> Result<String, ServiceError>;
}

/// Per-attempt timeout and retry budget for a [`ServiceGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub timeout: Duration,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            timeout: Duration::from_secs(20),
            backoff: Duration::from_millis(500),
        }
    }
}

/// Wraps a [`GenerationService`] in the [`DeckGenerator`] contract.
///
/// Timeouts and transport failures are retried up to the policy's budget and
/// then reported as [`SynthesisError::GenerationFailed`]. A response that
/// parses but is malformed is not retried. There is no silent fallback.
pub struct ServiceGenerator<S> {
    service: S,
    policy: RetryPolicy,
}

impl<S: GenerationService> ServiceGenerator<S> {
    pub fn new(service: S, policy: RetryPolicy) -> Self {
        Self { service, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }
}

#[async_trait]
impl<S: GenerationService> DeckGenerator for ServiceGenerator<S> {
    fn name(&self) -> &str {
        self.service.name()
    }

    async fn generate(&self, text: &str) -> Result<Deck, SynthesisError> {
        let notes = prepare_input(text)?;
        let attempts = self.policy.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match tokio::time::timeout(self.policy.timeout, self.service.request(notes)).await {
                Ok(Ok(body)) => return parse_deck(&body),
                Ok(Err(e)) => {
                    tracing::warn!(service = self.name(), attempt, error = %e, "generation request failed");
                    last_error = e.to_string();
                }
                Err(_) => {
                    tracing::warn!(
                        service = self.name(),
                        attempt,
                        timeout_secs = self.policy.timeout.as_secs(),
                        "generation request timed out"
                    );
                    last_error = format!("timed out after {}s", self.policy.timeout.as_secs());
                }
            }

            if attempt < attempts {
                tokio::time::sleep(self.policy.backoff * attempt).await;
            }
        }

        Err(SynthesisError::GenerationFailed(format!(
            "{} gave up after {} attempt(s): {}",
            self.name(),
            attempts,
            last_error
        )))
    }
}

fn parse_deck(body: &str) -> Result<Deck, SynthesisError> {
    let cards: Vec<Flashcard> = serde_json::from_str(body)
        .map_err(|e| SynthesisError::GenerationFailed(format!("malformed response: {e}")))?;
    Deck::new(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    const GOOD_BODY: &str = r#"[
        {"id":"a","question":"What is ATP?","answer":"Energy currency","type":"basic"},
        {"id":"b","question":"Pick one","answer":"B","type":"multiple-choice","options":["A","B","C","D"],"correctOption":1},
        {"id":"c","question":"Plants need ___","answer":"light","type":"fill-blank"}
    ]"#;

    enum Behaviour {
        Reply(&'static str),
        Fail,
        Hang,
        FailThenReply(&'static str),
    }

    struct ScriptedService {
        behaviour: Behaviour,
        calls: Arc<AtomicU32>,
    }

    impl ScriptedService {
        fn new(behaviour: Behaviour) -> (Self, Arc<AtomicU32>) {
            let calls = Arc::new(AtomicU32::new(0));
            (
                Self {
                    behaviour,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl GenerationService for ScriptedService {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn request(&self, _notes: &str) -> Result<String, ServiceError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            match self.behaviour {
                Behaviour::Reply(body) => Ok(body.to_string()),
                Behaviour::Fail => Err(ServiceError::Status {
                    status: 503,
                    message: "overloaded".to_string(),
                }),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(GOOD_BODY.to_string())
                }
                Behaviour::FailThenReply(body) if call > 1 => Ok(body.to_string()),
                Behaviour::FailThenReply(_) => Err(ServiceError::Transport("reset".to_string())),
            }
        }
    }

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            timeout: Duration::from_secs(2),
            backoff: Duration::from_millis(10),
        }
    }

    #[tokio::test]
    async fn valid_response_becomes_deck() {
        let (service, calls) = ScriptedService::new(Behaviour::Reply(GOOD_BODY));
        let deck = ServiceGenerator::new(service, policy(3)).generate("notes").await.unwrap();
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.get(1).unwrap().correct_option(), Some(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_is_reported_not_masked() {
        let (service, calls) = ScriptedService::new(Behaviour::Hang);
        let result = ServiceGenerator::new(service, policy(2)).generate("notes").await;
        match result {
            Err(SynthesisError::GenerationFailed(msg)) => assert!(msg.contains("timed out")),
            other => panic!("expected GenerationFailed, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_retried_within_budget() {
        let (service, calls) = ScriptedService::new(Behaviour::Fail);
        let result = ServiceGenerator::new(service, policy(3)).generate("notes").await;
        assert!(matches!(result, Err(SynthesisError::GenerationFailed(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn transient_failure_recovers() {
        let (service, calls) = ScriptedService::new(Behaviour::FailThenReply(GOOD_BODY));
        let deck = ServiceGenerator::new(service, policy(2)).generate("notes").await.unwrap();
        assert_eq!(deck.len(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_array_is_no_cards_produced() {
        let (service, calls) = ScriptedService::new(Behaviour::Reply("[]"));
        let result = ServiceGenerator::new(service, policy(3)).generate("notes").await;
        assert!(matches!(result, Err(SynthesisError::NoCardsProduced)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn malformed_card_shape_fails_generation() {
        let body = r#"[{"id":"a","question":"Q","answer":"A","type":"basic","correctOption":0}]"#;
        let (service, _) = ScriptedService::new(Behaviour::Reply(body));
        let result = ServiceGenerator::new(service, policy(1)).generate("notes").await;
        assert!(matches!(result, Err(SynthesisError::GenerationFailed(msg)) if msg.contains("malformed")));
    }

    #[tokio::test]
    async fn blank_notes_never_reach_the_service() {
        let (service, calls) = ScriptedService::new(Behaviour::Reply(GOOD_BODY));
        let result = ServiceGenerator::new(service, policy(1)).generate("  ").await;
        assert!(matches!(result, Err(SynthesisError::EmptyInput)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
