use std::fmt;

use rand::Rng;
use thiserror::Error;

use crate::builder::build_quiz;
use crate::model::{Quiz, RawQuestion, Selections};
use crate::score::{ScoreReport, score};
use crate::selection::{SelectionError, select_answer};

//
// ─── PHASES & TICKETS ──────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// No quiz loaded and no round requested.
    Idle,
    /// A round was requested and waits for question data.
    Fetching,
    /// Quiz built; selections accepted.
    Answering,
    /// Score revealed; selections frozen.
    Checked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionAction {
    Start,
    Check,
    PlayAgain,
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionAction::Start => "start",
            SessionAction::Check => "check answers",
            SessionAction::PlayAgain => "play again",
        };
        f.write_str(label)
    }
}

/// Identifies one issued fetch. Only the ticket currently in flight is
/// accepted when its result comes back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {action} while {from:?}")]
    InvalidTransition {
        from: SessionPhase,
        action: SessionAction,
    },
}

/// What `start` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// Questions were resident; the quiz is ready.
    Started,
    /// Waiting for data. `fetch` is set when a new request must be issued.
    Pending { fetch: Option<FetchTicket> },
}

/// What a completed fetch did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchApplied {
    /// Batch kept for a later `start`.
    Stored,
    /// A pending round was built from the batch.
    Built,
    /// A pending round received no questions and fell back to idle.
    Empty,
    /// Result of a ticket that is no longer in flight; ignored.
    Stale,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Whole client state for one player: the current round, its selections and
/// where the fetch lifecycle stands.
///
/// All transitions go through methods; the quiz and selection map are replaced
/// wholesale, never shared.
#[derive(Debug, Clone)]
pub struct QuizSession {
    phase: SessionPhase,
    quiz: Quiz,
    selections: Selections,
    is_checked: bool,
    input_enabled: bool,
    resident: Option<Vec<RawQuestion>>,
    pending_build: bool,
    in_flight: Option<FetchTicket>,
    next_ticket: u64,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            quiz: Quiz::empty(),
            selections: Selections::new(),
            is_checked: false,
            input_enabled: true,
            resident: None,
            pending_build: false,
            in_flight: None,
            next_ticket: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.is_checked
    }

    #[must_use]
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    #[must_use]
    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    #[must_use]
    pub fn has_resident_batch(&self) -> bool {
        self.resident.is_some()
    }

    /// Current number of correct answers. Meaningful once checked.
    #[must_use]
    pub fn score(&self) -> usize {
        score(&self.quiz)
    }

    /// Score of the round, available only after `check_answers`.
    #[must_use]
    pub fn report(&self) -> Option<ScoreReport> {
        self.is_checked.then(|| ScoreReport::from_quiz(&self.quiz))
    }

    /// Issues a ticket for a background fetch, unless one is already in flight.
    pub fn request_fetch(&mut self) -> Option<FetchTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        self.next_ticket += 1;
        let ticket = FetchTicket(self.next_ticket);
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Begins a round from the idle screen.
    ///
    /// Builds immediately when a fetched batch is resident; otherwise the
    /// build is deferred until the next fetch completes.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is idle.
    pub fn start<R>(&mut self, rng: &mut R) -> Result<StartOutcome, SessionError>
    where
        R: Rng + ?Sized,
    {
        if self.phase != SessionPhase::Idle {
            return Err(self.invalid(SessionAction::Start));
        }

        match self.resident.take() {
            Some(batch) if !batch.is_empty() => {
                self.build_round(&batch, rng);
                Ok(StartOutcome::Started)
            }
            _ => {
                self.pending_build = true;
                self.phase = SessionPhase::Fetching;
                Ok(StartOutcome::Pending {
                    fetch: self.request_fetch(),
                })
            }
        }
    }

    /// Accepts the result of the fetch identified by `ticket`.
    pub fn on_fetch_complete<R>(
        &mut self,
        ticket: FetchTicket,
        batch: Vec<RawQuestion>,
        rng: &mut R,
    ) -> FetchApplied
    where
        R: Rng + ?Sized,
    {
        if self.in_flight != Some(ticket) {
            return FetchApplied::Stale;
        }
        self.in_flight = None;

        if !self.pending_build {
            self.resident = Some(batch);
            return FetchApplied::Stored;
        }

        self.pending_build = false;
        if batch.is_empty() {
            self.phase = SessionPhase::Idle;
            return FetchApplied::Empty;
        }

        self.build_round(&batch, rng);
        FetchApplied::Built
    }

    /// Records that the fetch identified by `ticket` failed.
    ///
    /// A round waiting on it falls back to idle so it can be started again.
    /// Returns `false` for a stale ticket.
    pub fn on_fetch_failed(&mut self, ticket: FetchTicket) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        self.in_flight = None;
        if self.pending_build {
            self.pending_build = false;
            self.phase = SessionPhase::Idle;
        }
        true
    }

    /// Applies a click on an answer. Returns `false` when input is closed.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError` for indices outside the current quiz.
    pub fn select_answer(
        &mut self,
        question_index: usize,
        answer_index: usize,
    ) -> Result<bool, SelectionError> {
        if self.phase != SessionPhase::Answering || !self.input_enabled {
            return Ok(false);
        }

        let (quiz, selections) =
            select_answer(&self.quiz, &self.selections, question_index, answer_index)?;
        self.quiz = quiz;
        self.selections = selections;
        Ok(true)
    }

    /// Freezes the round and reveals its score.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless a round is being answered.
    pub fn check_answers(&mut self) -> Result<ScoreReport, SessionError> {
        if self.phase != SessionPhase::Answering {
            return Err(self.invalid(SessionAction::Check));
        }

        self.is_checked = true;
        self.input_enabled = false;
        self.phase = SessionPhase::Checked;
        Ok(ScoreReport::from_quiz(&self.quiz))
    }

    /// Discards the checked round and asks for a fresh batch.
    ///
    /// Returns the ticket to fetch with, or `None` when a fetch is already in
    /// flight; that one will build the next round.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the round is checked.
    pub fn play_again(&mut self) -> Result<Option<FetchTicket>, SessionError> {
        if self.phase != SessionPhase::Checked {
            return Err(self.invalid(SessionAction::PlayAgain));
        }

        self.quiz = Quiz::empty();
        self.selections = Selections::new();
        self.resident = None;
        self.is_checked = false;
        self.input_enabled = true;
        self.pending_build = true;
        self.phase = SessionPhase::Fetching;
        Ok(self.request_fetch())
    }

    fn build_round<R>(&mut self, batch: &[RawQuestion], rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.quiz = build_quiz(batch, rng);
        self.selections = Selections::new();
        self.is_checked = false;
        self.input_enabled = true;
        self.phase = SessionPhase::Answering;
    }

    fn invalid(&self, action: SessionAction) -> SessionError {
        SessionError::InvalidTransition {
            from: self.phase,
            action,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
