use std::sync::Arc;

use client::{Backend, GradingSink, InMemoryBackend};
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use exam_core::fixed_clock;
use exam_core::model::ExamSettings;
use services::{CatalogService, ExamFlowService, ScoreboardService};

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::state::QuizTestHandles;
use crate::views::{HomeView, QuizView, ScoreboardView};

#[derive(Clone)]
struct TestApp {
    settings: ExamSettings,
    exam_flow: Arc<ExamFlowService>,
    catalog: Arc<CatalogService>,
    scoreboard: Arc<ScoreboardService>,
}

impl UiApp for TestApp {
    fn exam_settings(&self) -> ExamSettings {
        self.settings
    }

    fn exam_flow(&self) -> Arc<ExamFlowService> {
        Arc::clone(&self.exam_flow)
    }

    fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    fn scoreboard(&self) -> Arc<ScoreboardService> {
        Arc::clone(&self.scoreboard)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz { problem_set: u64, num: u64 },
    Scoreboard(u64),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: Option<QuizTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.quiz_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz { problem_set, num } => rsx! {
            QuizView { problem_set_id: problem_set, num }
        },
        ViewKind::Scoreboard(problem_set) => rsx! {
            ScoreboardView { problem_set_id: problem_set }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: InMemoryBackend,
    pub quiz_handles: Option<QuizTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
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

pub fn setup_view_harness(view: ViewKind, backend: InMemoryBackend) -> ViewHarness {
    setup_view_harness_with_settings(view, backend, ExamSettings::standard())
}

pub fn setup_view_harness_with_settings(
    view: ViewKind,
    backend: InMemoryBackend,
    settings: ExamSettings,
) -> ViewHarness {
    let grading: Arc<dyn GradingSink> = Arc::new(backend.clone());
    setup_view_harness_with_grading(view, backend, settings, grading)
}

/// Like [`setup_view_harness_with_settings`] but with the grading collaborator
/// swapped out, for tests that need to stall or fail submissions in ways the
/// in-memory backend cannot.
pub fn setup_view_harness_with_grading(
    view: ViewKind,
    backend: InMemoryBackend,
    settings: ExamSettings,
    grading: Arc<dyn GradingSink>,
) -> ViewHarness {
    let collaborators = Backend::from_in_memory(backend.clone());
    let exam_flow = Arc::new(ExamFlowService::new(
        fixed_clock(),
        Arc::clone(&collaborators.questions),
        grading,
    ));
    let catalog = Arc::new(CatalogService::new(Arc::clone(&collaborators.catalog)));
    let scoreboard = Arc::new(ScoreboardService::new(Arc::clone(
        &collaborators.scoreboard,
    )));

    let quiz_handles = match view {
        ViewKind::Quiz { .. } => Some(QuizTestHandles::default()),
        _ => None,
    };

    let app = Arc::new(TestApp {
        settings,
        exam_flow,
        catalog,
        scoreboard,
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        backend,
        quiz_handles,
    }
}
