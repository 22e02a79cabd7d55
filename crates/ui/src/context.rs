use std::sync::Arc;

use exam_core::model::ExamSettings;
use services::{CatalogService, ExamFlowService, ScoreboardService};

/// Services the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn exam_settings(&self) -> ExamSettings;

    fn exam_flow(&self) -> Arc<ExamFlowService>;
    fn catalog(&self) -> Arc<CatalogService>;
    fn scoreboard(&self) -> Arc<ScoreboardService>;
}

#[derive(Clone)]
pub struct AppContext {
    exam_settings: ExamSettings,

    exam_flow: Arc<ExamFlowService>,
    catalog: Arc<CatalogService>,
    scoreboard: Arc<ScoreboardService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            exam_settings: app.exam_settings(),
            exam_flow: app.exam_flow(),
            catalog: app.catalog(),
            scoreboard: app.scoreboard(),
        }
    }

    #[must_use]
    pub fn exam_settings(&self) -> ExamSettings {
        self.exam_settings
    }

    #[must_use]
    pub fn exam_flow(&self) -> Arc<ExamFlowService> {
        Arc::clone(&self.exam_flow)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn scoreboard(&self) -> Arc<ScoreboardService> {
        Arc::clone(&self.scoreboard)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
