use dioxus::prelude::*;

use exam_core::model::{AnswerValue, ChoiceOption, OptionId, toggle_option};

/// Checkbox set. Toggling an already-selected option removes it; the stored
/// order is the order options were toggled on, which is fine because the
/// correct set is compared order-independently.
#[component]
pub fn MultiChoiceAnswer(
    options: Vec<ChoiceOption>,
    correct: Option<Vec<OptionId>>,
    selected: Vec<OptionId>,
    review: bool,
    on_change: EventHandler<AnswerValue>,
) -> Element {
    rsx! {
        div { class: "answer answer--multi-choice",
            for option in options {
                {
                    let id = option.id;
                    let is_selected = selected.contains(&id);
                    let class = option_class(id, is_selected, correct.as_deref(), review);
                    let selected_for_toggle = selected.clone();
                    rsx! {
                        label { class,
                            input {
                                r#type: "checkbox",
                                checked: is_selected,
                                disabled: review,
                                onchange: move |_| {
                                    let next = toggle_option(selected_for_toggle.clone(), id);
                                    on_change.call(AnswerValue::Choices(next));
                                },
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
    is_selected: bool,
    correct: Option<&[OptionId]>,
    review: bool,
) -> &'static str {
    if review {
        let in_correct = correct.is_some_and(|ids| ids.contains(&id));
        if in_correct {
            "option option--correct"
        } else if is_selected {
            "option option--wrong"
        } else {
            "option"
        }
    } else if is_selected {
        "option option--selected"
    } else {
        "option"
    }
}
