use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{HomeView, QuizView, ScoreboardView};

/// The only URL-addressable quiz state is the current question number
/// (`?num=<N>`, question 1 when absent). Answers and review mode stay
/// in memory on purpose.
#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz/:problem_set_id?:num", QuizView)] Quiz { problem_set_id: u64, num: u64 },
        #[route("/scoreboard/:problem_set_id", ScoreboardView)] Scoreboard { problem_set_id: u64 },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Topbar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Topbar() -> Element {
    rsx! {
        nav { class: "topbar",
            h1 { "Quzuu" }
            ul {
                li { Link { to: Route::Home {}, "Events" } }
            }
        }
    }
}
