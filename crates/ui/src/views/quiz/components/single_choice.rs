use dioxus::prelude::*;

use exam_core::model::{AnswerValue, ChoiceOption, OptionId};

/// Radio group. In review mode the correct option is highlighted and a
/// wrong pick is flagged; inputs are disabled.
#[component]
pub fn SingleChoiceAnswer(
    options: Vec<ChoiceOption>,
    correct: Option<OptionId>,
    selected: Option<OptionId>,
    review: bool,
    on_change: EventHandler<AnswerValue>,
) -> Element {
    rsx! {
        div { class: "answer answer--single-choice",
            for option in options {
                {
                    let id = option.id;
                    let class = option_class(id, selected, correct, review);
                    rsx! {
                        label { class,
                            input {
                                r#type: "radio",
                                checked: selected == Some(id),
                                disabled: review,
                                onchange: move |_| on_change.call(AnswerValue::Choice(id)),
                            }
                            span { class: "option__order", "{option.order}." }
                            span { class: "option__label", "{option.label}" }
                        }
                    }
                }
            }
        }
    }
}

fn option_class(
    id: OptionId,
    selected: Option<OptionId>,
    correct: Option<OptionId>,
    review: bool,
) -> &'static str {
    if review {
        if correct == Some(id) {
            "option option--correct"
        } else if selected == Some(id) {
            "option option--wrong"
        } else {
            "option"
        }
    } else if selected == Some(id) {
        "option option--selected"
    } else {
        "option"
    }
}
