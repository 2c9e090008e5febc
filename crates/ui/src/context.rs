use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use services::QuizService;

pub trait UiApp: Send + Sync {
    fn quiz_service(&self) -> Arc<QuizService>;
    fn prefetch_on_launch(&self) -> bool;
}

#[derive(Clone)]
pub struct AppContext {
    quiz_service: Arc<QuizService>,
    prefetch_once: Arc<AtomicBool>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz_service: app.quiz_service(),
            prefetch_once: Arc::new(AtomicBool::new(app.prefetch_on_launch())),
        }
    }

    #[must_use]
    pub fn quiz_service(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz_service)
    }

    /// True the first time it is asked when launch prefetch is configured.
    #[must_use]
    pub fn take_prefetch_on_launch(&self) -> bool {
        self.prefetch_once.swap(false, Ordering::AcqRel)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
