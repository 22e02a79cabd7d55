use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{SectionVm, map_sections};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            let sections = catalog
                .sections()
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_sections(sections))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page home-page",
            h2 { "Sections" }
            match state {
                ViewState::Idle => rsx! { p { "Idle" } },
                ViewState::Loading => rsx! { p { "Loading..." } },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(sections) => rsx! {
                    if sections.is_empty() {
                        p { "No sections available yet." }
                    }
                    div { class: "section-list",
                        for section in sections {
                            SectionCard { section }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn SectionCard(section: SectionVm) -> Element {
    rsx! {
        div { class: "section-card",
            h3 { "{section.title}" }
            if !section.description.is_empty() {
                p { class: "section-card__description", "{section.description}" }
            }
            if let Some(result) = &section.result {
                div { class: "section-card__result",
                    p { class: "section-card__score", "Score: {result.score}" }
                    ul {
                        li { "Correct: {result.correct}" }
                        li { "Wrong: {result.wrong}" }
                        li { "Empty: {result.blank}" }
                        li { "Being graded: {result.pending}" }
                    }
                    p { class: "section-card__window", "{result.window}" }
                }
            }
            div { class: "section-card__actions",
                Link {
                    class: "btn",
                    to: Route::Quiz { problem_set_id: section.id, num: 1 },
                    if section.result.is_some() { "Review" } else { "Start" }
                }
                Link {
                    class: "btn btn-secondary",
                    to: Route::Scoreboard { problem_set_id: section.id },
                    "Scoreboard"
                }
            }
        }
    }
}
