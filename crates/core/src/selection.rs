use std::sync::Arc;

use thiserror::Error;

use crate::model::{Quiz, Selections};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError {
    #[error("question {index} out of range (quiz has {len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("answer {index} out of range (question {question} has {len} answers)")]
    AnswerOutOfRange {
        question: usize,
        index: usize,
        len: usize,
    },
}

/// Selects `answer_index` for `question_index`, returning the next quiz and
/// selection map.
///
/// Any previous pick for the question is replaced, so each question keeps at
/// most one selected answer. Other questions are shared with the input quiz,
/// not copied. Selecting the already-selected answer again yields an equal
/// state.
///
/// # Errors
///
/// Returns `SelectionError` if either index is out of range; inputs are left
/// as they were.
pub fn select_answer(
    quiz: &Quiz,
    selections: &Selections,
    question_index: usize,
    answer_index: usize,
) -> Result<(Quiz, Selections), SelectionError> {
    let target = quiz
        .get(question_index)
        .ok_or(SelectionError::QuestionOutOfRange {
            index: question_index,
            len: quiz.len(),
        })?;

    if answer_index >= target.answers().len() {
        return Err(SelectionError::AnswerOutOfRange {
            question: question_index,
            index: answer_index,
            len: target.answers().len(),
        });
    }

    let questions = quiz
        .shared_iter()
        .enumerate()
        .map(|(index, question)| {
            if index == question_index {
                Arc::new(question.with_selection(answer_index))
            } else {
                Arc::clone(question)
            }
        })
        .collect();

    Ok((
        Quiz::from_shared(questions),
        selections.with(question_index, answer_index),
    ))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::builder::build_quiz;
    use crate::model::RawQuestion;

    fn quiz() -> Quiz {
        let batch = vec![
            RawQuestion::new("Capital of France?", "Paris", ["London"]),
            RawQuestion::new("2 + 2?", "4", ["5", "6", "22"]),
            RawQuestion::new("Largest planet?", "Jupiter", ["Mars", "Venus"]),
        ];
        build_quiz(&batch, &mut StdRng::seed_from_u64(11))
    }

    fn selected_count(quiz: &Quiz, question_index: usize) -> usize {
        quiz.get(question_index)
            .unwrap()
            .answers()
            .iter()
            .filter(|a| a.is_selected())
            .count()
    }

    #[test]
    fn selects_exactly_one_answer_in_target_question() {
        let quiz = quiz();
        let (next, selections) = select_answer(&quiz, &Selections::new(), 1, 2).unwrap();

        assert_eq!(selected_count(&next, 1), 1);
        assert_eq!(next.get(1).unwrap().selected_index(), Some(2));
        assert_eq!(selections.get(1), Some(2));
        assert_eq!(selections.len(), 1);
    }

    #[test]
    fn reselecting_moves_the_single_selection() {
        let quiz = quiz();
        let (quiz, selections) = select_answer(&quiz, &Selections::new(), 1, 0).unwrap();
        let (quiz, selections) = select_answer(&quiz, &selections, 1, 3).unwrap();

        assert_eq!(selected_count(&quiz, 1), 1);
        assert_eq!(quiz.get(1).unwrap().selected_index(), Some(3));
        assert_eq!(selections.get(1), Some(3));
    }

    #[test]
    fn other_questions_are_shared_not_copied() {
        let original = quiz();
        let (next, _) = select_answer(&original, &Selections::new(), 1, 1).unwrap();

        assert!(Arc::ptr_eq(
            original.shared(0).unwrap(),
            next.shared(0).unwrap()
        ));
        assert!(Arc::ptr_eq(
            original.shared(2).unwrap(),
            next.shared(2).unwrap()
        ));
        assert!(!Arc::ptr_eq(
            original.shared(1).unwrap(),
            next.shared(1).unwrap()
        ));
        assert_eq!(original.get(0), next.get(0));
        assert_eq!(original.get(2), next.get(2));
    }

    #[test]
    fn input_quiz_is_not_mutated() {
        let original = quiz();
        let snapshot = original.clone();

        let _ = select_answer(&original, &Selections::new(), 0, 1).unwrap();

        assert_eq!(original, snapshot);
        assert_eq!(original.get(0).unwrap().selected_index(), None);
    }

    #[test]
    fn selecting_twice_is_idempotent() {
        let quiz = quiz();
        let once = select_answer(&quiz, &Selections::new(), 2, 1).unwrap();
        let twice = select_answer(&once.0, &once.1, 2, 1).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let quiz = quiz();

        let err = select_answer(&quiz, &Selections::new(), 3, 0).unwrap_err();
        assert_eq!(err, SelectionError::QuestionOutOfRange { index: 3, len: 3 });

        let err = select_answer(&quiz, &Selections::new(), 0, 2).unwrap_err();
        assert_eq!(
            err,
            SelectionError::AnswerOutOfRange {
                question: 0,
                index: 2,
                len: 2
            }
        );
    }

    #[test]
    fn every_question_keeps_at_most_one_selection() {
        let mut state = (quiz(), Selections::new());
        let clicks = [(0, 1), (1, 2), (0, 0), (2, 2), (1, 0), (2, 1), (0, 1)];

        for (q, a) in clicks {
            state = select_answer(&state.0, &state.1, q, a).unwrap();
            for index in 0..state.0.len() {
                assert!(selected_count(&state.0, index) <= 1);
            }
        }

        assert_eq!(state.1.iter().collect::<Vec<_>>(), vec![(0, 1), (1, 0), (2, 1)]);
    }
}
