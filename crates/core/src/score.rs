use std::fmt;

use crate::model::{Quiz, Selections};

/// Counts questions whose correct answer is the selected one.
///
/// Correctness is decided by index, never by comparing answer text.
#[must_use]
pub fn score(quiz: &Quiz) -> usize {
    quiz.iter()
        .filter(|question| {
            question
                .correct_answer()
                .is_some_and(|answer| answer.is_selected())
        })
        .count()
}

/// Same count computed from the selection map instead of answer flags.
#[must_use]
pub fn score_selections(quiz: &Quiz, selections: &Selections) -> usize {
    quiz.iter()
        .enumerate()
        .filter(|(index, question)| selections.get(*index) == Some(question.correct_answer_index()))
        .count()
}

/// Result of checking a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    pub correct: usize,
    pub total: usize,
}

impl ScoreReport {
    #[must_use]
    pub fn from_quiz(quiz: &Quiz) -> Self {
        Self {
            correct: score(quiz),
            total: quiz.len(),
        }
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "You scored {} / {}", self.correct, self.total)?;
        if self.is_perfect() {
            write!(f, " Congratulations!🎉")?;
        }
        Ok(())
    }
}
