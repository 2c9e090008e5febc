use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::RawQuestion;
use services::{QuestionSource, QuizService, TriviaApiError};
use tokio::sync::Notify;

use crate::context::{UiApp, build_app_context};
use crate::views::{QuizTestHandles, QuizView};
use crate::vm::{QuizIntent, QuizVm};

#[derive(Clone)]
pub enum Reply {
    Batch(Vec<RawQuestion>),
    RateLimited,
}

/// Answers every fetch with the same reply. When gated, each fetch waits
/// for one `Notify` permit.
pub struct StaticSource {
    reply: Reply,
    gate: Option<Arc<Notify>>,
}

#[async_trait]
impl QuestionSource for StaticSource {
    async fn fetch_batch(&self) -> Result<Vec<RawQuestion>, TriviaApiError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.reply {
            Reply::Batch(batch) => Ok(batch.clone()),
            Reply::RateLimited => Err(TriviaApiError::ResponseCode {
                code: 5,
                reason: "rate limited",
            }),
        }
    }
}

struct TestApp {
    quiz_service: Arc<QuizService>,
    prefetch: bool,
}

impl UiApp for TestApp {
    fn quiz_service(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz_service)
    }

    fn prefetch_on_launch(&self) -> bool {
        self.prefetch
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn QuizHarnessRoot(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizView {} }
}

pub struct QuizHarness {
    pub dom: VirtualDom,
    handles: QuizTestHandles,
    gate: Option<Arc<Notify>>,
}

impl QuizHarness {
    pub fn vm(&self) -> Signal<QuizVm> {
        self.handles.vm()
    }

    pub fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    /// Lets one gated fetch return. No-op for ungated harnesses.
    pub fn release_fetch(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Lets spawned fetches finish and re-renders.
    pub async fn settle(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
            drive_dom(&mut self.dom);
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_quiz_harness(reply: Reply, prefetch: bool) -> QuizHarness {
    build_harness(reply, prefetch, None)
}

/// Fetches stay pending until `release_fetch`, so loading states can be observed.
pub fn setup_gated_quiz_harness(reply: Reply) -> QuizHarness {
    build_harness(reply, false, Some(Arc::new(Notify::new())))
}

fn build_harness(reply: Reply, prefetch: bool, gate: Option<Arc<Notify>>) -> QuizHarness {
    let service = QuizService::new(Arc::new(StaticSource {
        reply,
        gate: gate.clone(),
    }));
    let app = Arc::new(TestApp {
        quiz_service: Arc::new(service),
        prefetch,
    });
    let handles = QuizTestHandles::default();

    let mut dom = VirtualDom::new_with_props(
        QuizHarnessRoot,
        HarnessProps {
            app,
            handles: handles.clone(),
        },
    );
    dom.rebuild_in_place();
    drive_dom(&mut dom);

    QuizHarness { dom, handles, gate }
}
