//! Per-user review session.
//!
//! A session owns the loaded deck through its navigator. Failed generations
//! leave both untouched. Only one upload may be in flight at a time; its
//! progress stays readable after it finishes.

use thiserror::Error;

use crate::error::SynthesisError;
use crate::extractor::Progress;
use crate::navigator::{CardView, DeckNavigator, NavigatorState};
use crate::synthesis::DeckGenerator;
use crate::types::Deck;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("an upload is already being processed for this session")]
    UploadInFlight,

    #[error("no deck has been generated yet")]
    NoDeck,
}

/// Navigation requests issued by the review surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Next,
    Previous,
    Flip,
}

#[derive(Debug, Default)]
pub struct Session {
    navigator: DeckNavigator,
    upload: Option<Progress>,
    last_upload_progress: Option<u8>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.navigator.deck()
    }

    pub fn state(&self) -> NavigatorState {
        self.navigator.state()
    }

    pub fn view(&self) -> Option<CardView> {
        self.navigator.view()
    }

    /// Replace the current deck, resetting navigation.
    pub fn load(&mut self, deck: Deck) {
        self.navigator.load(deck);
    }

    /// Generate a new deck from `text`. On failure the previous deck and
    /// navigator position survive unchanged.
    pub async fn regenerate(
        &mut self,
        generator: &dyn DeckGenerator,
        text: &str,
    ) -> Result<&Deck, SynthesisError> {
        let deck = generator.generate(text).await?;
        tracing::info!(generator = generator.name(), cards = deck.len(), "loaded new deck");
        self.navigator.load(deck);
        self.navigator.deck().ok_or(SynthesisError::NoCardsProduced)
    }

    /// Apply a navigation action and return the resulting view.
    pub fn apply(&mut self, action: ReviewAction) -> Result<CardView, SessionError> {
        match action {
            ReviewAction::Next => self.navigator.next(),
            ReviewAction::Previous => self.navigator.previous(),
            ReviewAction::Flip => self.navigator.flip(),
        }
        self.navigator.view().ok_or(SessionError::NoDeck)
    }

    /// Mark an upload as started and hand back the progress it reports into.
    pub fn begin_upload(&mut self) -> Result<Progress, SessionError> {
        if self.upload.is_some() {
            return Err(SessionError::UploadInFlight);
        }
        let progress = Progress::new();
        self.upload = Some(progress.clone());
        Ok(progress)
    }

    pub fn finish_upload(&mut self) {
        if let Some(progress) = self.upload.take() {
            self.last_upload_progress = Some(progress.current());
        }
    }

    pub fn upload_in_flight(&self) -> bool {
        self.upload.is_some()
    }

    /// Progress of the running upload, else where the last one stopped.
    pub fn upload_progress(&self) -> Option<u8> {
        match &self.upload {
            Some(progress) => Some(progress.current()),
            None => self.last_upload_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::FallbackGenerator;
    use pretty_assertions::assert_eq;

    const NOTES: &str = "Enzymes lower activation energy for biochemical reactions";

    #[tokio::test]
    async fn failed_regeneration_keeps_previous_deck() {
        let mut session = Session::new();
        session.regenerate(&FallbackGenerator, NOTES).await.unwrap();
        session.apply(ReviewAction::Next).unwrap();
        session.apply(ReviewAction::Flip).unwrap();
        let before_deck = session.deck().cloned();
        let before_state = session.state();

        let result = session.regenerate(&FallbackGenerator, "   ").await;
        assert!(matches!(result, Err(SynthesisError::EmptyInput)));
        assert_eq!(session.deck().cloned(), before_deck);
        assert_eq!(session.state(), before_state);
    }

    #[tokio::test]
    async fn regeneration_resets_navigation() {
        let mut session = Session::new();
        session.regenerate(&FallbackGenerator, NOTES).await.unwrap();
        session.apply(ReviewAction::Previous).unwrap();
        let deck = session.regenerate(&FallbackGenerator, "tiny").await.unwrap();
        assert_eq!(deck.len(), 3);
        assert_eq!(session.state(), NavigatorState::default());
    }

    #[test]
    fn actions_without_deck_report_no_deck() {
        let mut session = Session::new();
        assert_eq!(session.apply(ReviewAction::Flip), Err(SessionError::NoDeck));
    }

    #[test]
    fn second_upload_is_refused_until_first_finishes() {
        let mut session = Session::new();
        session.begin_upload().unwrap();
        assert!(matches!(session.begin_upload(), Err(SessionError::UploadInFlight)));
        session.finish_upload();
        assert!(session.begin_upload().is_ok());
    }

    #[test]
    fn upload_progress_is_live_then_kept() {
        let mut session = Session::new();
        assert_eq!(session.upload_progress(), None);

        let progress = session.begin_upload().unwrap();
        progress.advance(30);
        assert_eq!(session.upload_progress(), Some(30));

        progress.advance(90);
        session.finish_upload();
        progress.advance(100);
        assert!(!session.upload_in_flight());
        assert_eq!(session.upload_progress(), Some(90));
    }

    #[test]
    fn loading_a_generated_deck_resets_navigation() {
        let mut session = Session::new();
        session.load(crate::synthesis::synthesize(NOTES).unwrap());
        session.apply(ReviewAction::Next).unwrap();
        session.load(crate::synthesis::synthesize("tiny").unwrap());
        assert_eq!(session.deck().map(Deck::len), Some(3));
        assert_eq!(session.state(), NavigatorState::default());
    }
}
