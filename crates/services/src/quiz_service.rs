use std::sync::Arc;

use quiz_core::{
    FetchApplied, FetchTicket, QuizSession, RawQuestion, ScoreReport, StartOutcome,
};

use crate::error::{QuizServiceError, TriviaApiError};
use crate::trivia_client::QuestionSource;

/// Result of one fetch, tagged with the ticket it was issued under.
#[derive(Debug)]
pub struct FetchedBatch {
    pub ticket: FetchTicket,
    pub result: Result<Vec<RawQuestion>, TriviaApiError>,
}

/// Drives a `QuizSession` against a question source.
///
/// The session is passed in by the caller and never held across the fetch, so
/// the view can keep rendering while a request is outstanding.
#[derive(Clone)]
pub struct QuizService {
    source: Arc<dyn QuestionSource>,
}

impl QuizService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self { source }
    }

    /// Requests a batch ahead of the first round.
    pub fn prefetch(&self, session: &mut QuizSession) -> Option<FetchTicket> {
        let ticket = session.request_fetch();
        if let Some(ticket) = ticket {
            tracing::debug!(ticket = ticket.value(), "prefetching questions");
        }
        ticket
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` when the session is not idle.
    pub fn start(&self, session: &mut QuizSession) -> Result<StartOutcome, QuizServiceError> {
        let outcome = session.start(&mut rand::rng())?;
        match outcome {
            StartOutcome::Started => {
                tracing::info!(questions = session.quiz().len(), "round started");
            }
            StartOutcome::Pending { fetch } => {
                tracing::debug!(
                    ticket = fetch.map(|t| t.value()),
                    "round waiting for questions"
                );
            }
        }
        Ok(outcome)
    }

    /// Returns whether the click changed anything.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` for indices outside the quiz.
    pub fn select_answer(
        &self,
        session: &mut QuizSession,
        question_index: usize,
        answer_index: usize,
    ) -> Result<bool, QuizServiceError> {
        let applied = session.select_answer(question_index, answer_index)?;
        if !applied {
            tracing::debug!(question_index, answer_index, "selection ignored, input closed");
        }
        Ok(applied)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` unless a round is being answered.
    pub fn check_answers(
        &self,
        session: &mut QuizSession,
    ) -> Result<ScoreReport, QuizServiceError> {
        let report = session.check_answers()?;
        tracing::info!(correct = report.correct, total = report.total, "round checked");
        Ok(report)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` unless the round is checked.
    pub fn play_again(
        &self,
        session: &mut QuizSession,
    ) -> Result<Option<FetchTicket>, QuizServiceError> {
        let ticket = session.play_again()?;
        tracing::info!(ticket = ticket.map(|t| t.value()), "new round requested");
        Ok(ticket)
    }

    /// Runs the fetch for `ticket` without touching any session.
    pub async fn fetch(&self, ticket: FetchTicket) -> FetchedBatch {
        let result = self.source.fetch_batch().await;
        FetchedBatch { ticket, result }
    }

    /// Applies a finished fetch to the session.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Api` when the fetch failed and was still
    /// current. Failures of stale tickets are dropped.
    pub fn apply(
        &self,
        session: &mut QuizSession,
        fetched: FetchedBatch,
    ) -> Result<FetchApplied, QuizServiceError> {
        let FetchedBatch { ticket, result } = fetched;
        match result {
            Ok(batch) => {
                let count = batch.len();
                let applied = session.on_fetch_complete(ticket, batch, &mut rand::rng());
                match applied {
                    FetchApplied::Stale => {
                        tracing::debug!(ticket = ticket.value(), "dropping stale batch");
                    }
                    FetchApplied::Empty => {
                        tracing::warn!(ticket = ticket.value(), "question source returned no questions");
                    }
                    FetchApplied::Stored | FetchApplied::Built => {
                        tracing::info!(ticket = ticket.value(), count, ?applied, "questions received");
                    }
                }
                Ok(applied)
            }
            Err(err) => {
                if !session.on_fetch_failed(ticket) {
                    tracing::debug!(ticket = ticket.value(), error = %err, "dropping stale failure");
                    return Ok(FetchApplied::Stale);
                }
                tracing::warn!(ticket = ticket.value(), error = %err, "question fetch failed");
                Err(err.into())
            }
        }
    }

    /// Fetches and applies in one step.
    ///
    /// # Errors
    ///
    /// See [`Self::apply`].
    pub async fn load(
        &self,
        session: &mut QuizSession,
        ticket: FetchTicket,
    ) -> Result<FetchApplied, QuizServiceError> {
        let fetched = self.fetch(ticket).await;
        self.apply(session, fetched)
    }
}
