use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;
use crate::vm::format_countdown;

/// Jump list plus timer plus submit trigger, the right-hand quiz panel.
///
/// The submit control disappears once the attempt is reviewed; while a
/// submission is in flight it stays visible but disabled.
#[component]
pub fn QuizNavigator(
    problem_set_id: u64,
    current: u64,
    question_numbers: Vec<u64>,
    answered: Vec<u64>,
    remaining_secs: u32,
    reviewing: bool,
    submitting: bool,
    on_submit: EventHandler<()>,
) -> Element {
    rsx! {
        aside { class: "quiz-nav",
            div { class: "quiz-nav__timer",
                h3 { "Time Left" }
                p { class: "quiz-nav__clock", "{format_countdown(remaining_secs)}" }
            }
            div { class: "quiz-nav__numbers",
                for number in question_numbers {
                    Link {
                        class: number_class(number, current, &answered),
                        to: Route::Quiz { problem_set_id, num: number },
                        "{number:02}"
                    }
                }
            }
            if !reviewing {
                button {
                    class: "btn quiz-nav__submit",
                    disabled: submitting,
                    onclick: move |_| on_submit.call(()),
                    if submitting { "Submitting..." } else { "Submit Answers" }
                }
            }
        }
    }
}

fn number_class(number: u64, current: u64, answered: &[u64]) -> &'static str {
    if number == current {
        "quiz-nav__number quiz-nav__number--current"
    } else if answered.contains(&number) {
        "quiz-nav__number quiz-nav__number--answered"
    } else {
        "quiz-nav__number"
    }
}
