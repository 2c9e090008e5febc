mod display_vm;
mod quiz_vm;

pub use display_vm::{answer_class, decode_entities};
pub use quiz_vm::{AnswerVm, QuestionVm, QuizIntent, QuizScreen, QuizVm};
