#![forbid(unsafe_code)]

pub mod builder;
pub mod error;
pub mod model;
pub mod score;
pub mod selection;
pub mod session;
pub mod shuffle;

pub use builder::{build_question, build_quiz};
pub use error::Error;
pub use model::{Answer, Question, Quiz, RawQuestion, Selections, TriviaResponse};
pub use score::{ScoreReport, score, score_selections};
pub use selection::{SelectionError, select_answer};
pub use session::{
    FetchApplied, FetchTicket, QuizSession, SessionAction, SessionError, SessionPhase,
    StartOutcome,
};
pub use shuffle::{shuffle, shuffle_in_place};
