mod quiz;
mod raw;

pub use quiz::{Answer, Question, Quiz, Selections};
pub use raw::{RawQuestion, TriviaResponse};
