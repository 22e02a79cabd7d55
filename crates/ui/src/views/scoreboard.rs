use dioxus::prelude::*;

use exam_core::model::ProblemSetId;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::map_standings;

#[component]
pub fn ScoreboardView(problem_set_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let scoreboard = ctx.scoreboard();
    let problem_set = ProblemSetId::new(problem_set_id);

    let resource = use_resource(move || {
        let scoreboard = scoreboard.clone();
        async move {
            let standings = scoreboard
                .standings(problem_set)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_standings(standings))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page scoreboard-page",
            h2 { "Scoreboard" }
            match state {
                ViewState::Idle => rsx! { p { "Idle" } },
                ViewState::Loading => rsx! { p { "Loading..." } },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { "Nobody has finished this section yet." }
                    } else {
                        table { class: "scoreboard",
                            thead {
                                tr {
                                    th { "Rank" }
                                    th { "Username" }
                                    th { "Score" }
                                    th { "Duration (min)" }
                                }
                            }
                            tbody {
                                for row in rows {
                                    tr {
                                        td { "{row.rank}" }
                                        td { "{row.username}" }
                                        td { "{row.score}" }
                                        td { "{row.duration}" }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
