use rand::Rng;

use crate::model::{Answer, Question, Quiz, RawQuestion};
use crate::shuffle::shuffle;

/// Builds one round from a fetched batch.
///
/// Each question gets its answers shuffled once; the order is fixed from then on.
#[must_use]
pub fn build_quiz<R>(raw_questions: &[RawQuestion], rng: &mut R) -> Quiz
where
    R: Rng + ?Sized,
{
    let questions = raw_questions
        .iter()
        .map(|raw| build_question(raw, rng))
        .collect();
    Quiz::new(questions)
}

/// Builds a single question: correct answer first, shuffle, then locate it.
///
/// If an incorrect answer repeats the correct text, the first match after
/// shuffling is taken as correct.
#[must_use]
pub fn build_question<R>(raw: &RawQuestion, rng: &mut R) -> Question
where
    R: Rng + ?Sized,
{
    let mut texts = Vec::with_capacity(raw.answer_count());
    texts.push(raw.correct_answer.as_str());
    texts.extend(raw.incorrect_answers.iter().map(String::as_str));

    let texts = shuffle(texts, rng);
    // The correct text was pushed before shuffling, so a match always exists.
    let correct_answer_index = texts
        .iter()
        .position(|text| *text == raw.correct_answer)
        .unwrap_or_default();

    let answers = texts.into_iter().map(Answer::new).collect();

    Question::new(raw.question.clone(), answers, correct_answer_index).with_metadata(
        raw.category.clone(),
        raw.difficulty.clone(),
        raw.kind.clone(),
    )
}
