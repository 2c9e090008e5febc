use dioxus::prelude::*;
use quiz_core::FetchTicket;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{AnswerVm, QuestionVm, QuizIntent, QuizScreen, QuizVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let service = ctx.quiz_service();

    let vm = use_signal(QuizVm::new);
    let error = use_signal(|| None::<ViewError>);

    let run_fetch = {
        let service = service.clone();
        use_callback(move |ticket: FetchTicket| {
            let service = service.clone();
            let mut vm = vm;
            let mut error = error;
            spawn(async move {
                // The session stays readable while the request is outstanding.
                let fetched = service.fetch(ticket).await;
                let result = vm.write().apply(&service, fetched);
                match result {
                    Ok(()) => error.set(None),
                    Err(err) => {
                        tracing::warn!(?err, "questions not loaded");
                        error.set(Some(err));
                    }
                }
            });
        })
    };

    {
        let service = service.clone();
        let ctx = ctx.clone();
        use_effect(move || {
            if !ctx.take_prefetch_on_launch() {
                return;
            }
            let mut vm = vm;
            let ticket = vm.write().prefetch(&service);
            if let Some(ticket) = ticket {
                run_fetch.call(ticket);
            }
        });
    }

    let dispatch = {
        let service = service.clone();
        use_callback(move |intent: QuizIntent| {
            let mut vm = vm;
            let mut error = error;
            let result = vm.write().dispatch(&service, intent);
            match result {
                Ok(ticket) => {
                    error.set(None);
                    if let Some(ticket) = ticket {
                        run_fetch.call(ticket);
                    }
                }
                Err(err) => {
                    tracing::debug!(?err, ?intent, "intent rejected");
                    error.set(Some(err));
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, vm);
            }
        }
    }

    let (screen, questions, score_label) = {
        let vm_guard = vm.read();
        (vm_guard.screen(), vm_guard.questions(), vm_guard.score_label())
    };
    let current_error = *error.read();

    rsx! {
        match screen {
            QuizScreen::Intro | QuizScreen::Loading => rsx! {
                IntroPanel {
                    loading: screen == QuizScreen::Loading,
                    error: current_error,
                    on_start: move |()| dispatch.call(QuizIntent::Start),
                }
            },
            QuizScreen::Questions => rsx! {
                main { class: "quiz",
                    for question in questions {
                        QuestionBlock {
                            key: "{question.index}",
                            question: question.clone(),
                            on_select: move |(question, answer): (usize, usize)| {
                                dispatch.call(QuizIntent::Select { question, answer });
                            },
                        }
                    }
                    if let Some(err) = current_error {
                        p { class: "error", "{err.message()}" }
                    }
                    if let Some(label) = score_label {
                        div { class: "checked",
                            h2 { "{label}" }
                            button {
                                class: "play-again-button",
                                r#type: "button",
                                onclick: move |_| dispatch.call(QuizIntent::PlayAgain),
                                "Play again"
                            }
                        }
                    } else {
                        button {
                            class: "check-answers-button",
                            r#type: "button",
                            onclick: move |_| dispatch.call(QuizIntent::Check),
                            "Check answers"
                        }
                    }
                }
            },
        }
    }
}

#[component]
fn IntroPanel(loading: bool, error: Option<ViewError>, on_start: EventHandler<()>) -> Element {
    let label = if error.is_some() { "Retry" } else { "Start quiz" };
    rsx! {
        div { class: "quiz-intro-section",
            div { class: "quiz-intro",
                h1 { "Quizzical" }
                p { "Answer a handful of random trivia questions, then check your score." }
                if loading {
                    p { class: "loading", "Loading questions..." }
                } else {
                    if let Some(err) = error {
                        p { class: "error", "{err.message()}" }
                    }
                    button {
                        class: "start-quiz-button",
                        r#type: "button",
                        onclick: move |_| on_start.call(()),
                        "{label}"
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionBlock(question: QuestionVm, on_select: EventHandler<(usize, usize)>) -> Element {
    let question_index = question.index;
    rsx! {
        div { class: "question",
            h1 { "{question.text}" }
            div { class: "answers",
                for answer in question.answers.iter() {
                    AnswerButton {
                        key: "{answer.index}",
                        question_index,
                        answer: answer.clone(),
                        on_select,
                    }
                }
            }
            hr {}
        }
    }
}

#[component]
fn AnswerButton(
    question_index: usize,
    answer: AnswerVm,
    on_select: EventHandler<(usize, usize)>,
) -> Element {
    let answer_index = answer.index;
    rsx! {
        button {
            class: "{answer.class}",
            r#type: "button",
            onclick: move |_| on_select.call((question_index, answer_index)),
            "{answer.text}"
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<QuizVm>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<QuizVm>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<QuizVm> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
