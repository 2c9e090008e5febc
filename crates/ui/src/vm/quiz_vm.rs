use quiz_core::{FetchApplied, FetchTicket, QuizSession, SessionPhase, StartOutcome};
use services::{FetchedBatch, QuizService, QuizServiceError};

use crate::views::ViewError;
use crate::vm::display_vm::{answer_class, decode_entities};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start,
    Select { question: usize, answer: usize },
    Check,
    PlayAgain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    Intro,
    Loading,
    Questions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerVm {
    pub index: usize,
    pub text: String,
    pub class: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub index: usize,
    pub text: String,
    pub answers: Vec<AnswerVm>,
}

/// View model over a `QuizSession`.
///
/// Intents that need data return the ticket the view should fetch with;
/// the fetch result comes back through `apply`.
#[derive(Clone, Debug, Default)]
pub struct QuizVm {
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn prefetch(&mut self, service: &QuizService) -> Option<FetchTicket> {
        service.prefetch(&mut self.session)
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` for transitions the session rejects.
    pub fn dispatch(
        &mut self,
        service: &QuizService,
        intent: QuizIntent,
    ) -> Result<Option<FetchTicket>, ViewError> {
        let session = &mut self.session;
        match intent {
            QuizIntent::Start => match service.start(session).map_err(view_error)? {
                StartOutcome::Started => Ok(None),
                StartOutcome::Pending { fetch } => Ok(fetch),
            },
            QuizIntent::Select { question, answer } => {
                service
                    .select_answer(session, question, answer)
                    .map_err(view_error)?;
                Ok(None)
            }
            QuizIntent::Check => {
                service.check_answers(session).map_err(view_error)?;
                Ok(None)
            }
            QuizIntent::PlayAgain => service.play_again(session).map_err(view_error),
        }
    }

    /// # Errors
    ///
    /// Returns `ViewError::FetchFailed` when the questions could not be loaded
    /// and `ViewError::NoQuestions` when the source returned an empty batch.
    pub fn apply(&mut self, service: &QuizService, fetched: FetchedBatch) -> Result<(), ViewError> {
        match service.apply(&mut self.session, fetched).map_err(view_error)? {
            FetchApplied::Empty => Err(ViewError::NoQuestions),
            FetchApplied::Stored | FetchApplied::Built | FetchApplied::Stale => Ok(()),
        }
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreen {
        match self.session.phase() {
            SessionPhase::Idle => QuizScreen::Intro,
            SessionPhase::Fetching => QuizScreen::Loading,
            SessionPhase::Answering | SessionPhase::Checked => QuizScreen::Questions,
        }
    }

    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.session.is_checked()
    }

    /// Decoded questions with their answer classes, ready to render.
    #[must_use]
    pub fn questions(&self) -> Vec<QuestionVm> {
        let is_checked = self.session.is_checked();
        let selections = self.session.selections();

        self.session
            .quiz()
            .iter()
            .enumerate()
            .map(|(question_index, question)| {
                let answers = question
                    .answers()
                    .iter()
                    .enumerate()
                    .map(|(answer_index, answer)| {
                        let is_selected = answer.is_selected()
                            && selections.get(question_index) == Some(answer_index);
                        let is_correct = question.correct_answer_index() == answer_index;
                        AnswerVm {
                            index: answer_index,
                            text: decode_entities(answer.text()),
                            class: answer_class(is_checked, is_selected, is_correct),
                        }
                    })
                    .collect();

                QuestionVm {
                    index: question_index,
                    text: decode_entities(question.text()),
                    answers,
                }
            })
            .collect()
    }

    #[must_use]
    pub fn score_label(&self) -> Option<String> {
        self.session.report().map(|report| report.to_string())
    }
}

fn view_error(err: QuizServiceError) -> ViewError {
    match err {
        QuizServiceError::Api(_) => ViewError::FetchFailed,
        _ => ViewError::Unknown,
    }
}
