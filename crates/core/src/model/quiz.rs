use std::collections::BTreeMap;
use std::sync::Arc;

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    text: String,
    is_selected: bool,
}

impl Answer {
    /// Creates an unselected answer.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_selected: false,
        }
    }

    /// Raw answer text, entities not decoded.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub(crate) fn with_selected(&self, is_selected: bool) -> Self {
        Self {
            text: self.text.clone(),
            is_selected,
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A built question: answers in their final order plus the position of the
/// correct one.
///
/// `correct_answer_index` is fixed at build time and never moves, whatever the
/// selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    answers: Vec<Answer>,
    correct_answer_index: usize,
    category: String,
    difficulty: String,
    kind: String,
}

impl Question {
    pub(crate) fn new(text: String, answers: Vec<Answer>, correct_answer_index: usize) -> Self {
        Self {
            text,
            answers,
            correct_answer_index,
            category: String::new(),
            difficulty: String::new(),
            kind: String::new(),
        }
    }

    pub(crate) fn with_metadata(
        mut self,
        category: String,
        difficulty: String,
        kind: String,
    ) -> Self {
        self.category = category;
        self.difficulty = difficulty;
        self.kind = kind;
        self
    }

    /// Raw question text, entities not decoded.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn correct_answer_index(&self) -> usize {
        self.correct_answer_index
    }

    #[must_use]
    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.get(self.correct_answer_index)
    }

    /// Index of the selected answer, if any.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.answers.iter().position(Answer::is_selected)
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    /// Question type as reported by the source (`multiple`, `boolean`).
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Copy of this question with exactly `answer_index` selected.
    pub(crate) fn with_selection(&self, answer_index: usize) -> Self {
        let answers = self
            .answers
            .iter()
            .enumerate()
            .map(|(index, answer)| answer.with_selected(index == answer_index))
            .collect();

        Self {
            text: self.text.clone(),
            answers,
            correct_answer_index: self.correct_answer_index,
            category: self.category.clone(),
            difficulty: self.difficulty.clone(),
            kind: self.kind.clone(),
        }
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// Ordered questions of one round.
///
/// Questions are shared so that rebuilding one of them leaves the others
/// pointer-identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Quiz {
    questions: Vec<Arc<Question>>,
}

impl Quiz {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions: questions.into_iter().map(Arc::new).collect(),
        }
    }

    pub(crate) fn from_shared(questions: Vec<Arc<Question>>) -> Self {
        Self { questions }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index).map(Arc::as_ref)
    }

    /// Shared handle to a question, for identity comparisons.
    #[must_use]
    pub fn shared(&self, index: usize) -> Option<&Arc<Question>> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().map(Arc::as_ref)
    }

    pub(crate) fn shared_iter(&self) -> impl Iterator<Item = &Arc<Question>> {
        self.questions.iter()
    }
}

//
// ─── SELECTIONS ────────────────────────────────────────────────────────────────
//

/// Sparse map from question index to the answer index the user picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections(BTreeMap<usize, usize>);

impl Selections {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, question_index: usize) -> Option<usize> {
        self.0.get(&question_index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(question_index, answer_index)` pairs in question order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().map(|(q, a)| (*q, *a))
    }

    pub(crate) fn with(&self, question_index: usize, answer_index: usize) -> Self {
        let mut next = self.0.clone();
        next.insert(question_index, answer_index);
        Self(next)
    }
}

impl FromIterator<(usize, usize)> for Selections {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
