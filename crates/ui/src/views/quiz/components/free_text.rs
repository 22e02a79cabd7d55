use dioxus::prelude::*;

use exam_core::model::AnswerValue;

/// Status of the optimistic autosave indicator. Display only; never part of
/// the answer value and never a reason to block submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
}

const SAVE_CONFIRM_MS: u64 = 600;

/// Single-line free-text answer. Every keystroke reports the new value up
/// and flips the indicator to "Saving…"; a delayed confirmation flips it to
/// "Saved" only if no newer keystroke arrived in between. The confirmation
/// task is scoped to this component, so navigating away drops it.
#[component]
pub fn FreeTextAnswer(
    value: String,
    correct: Option<String>,
    review: bool,
    on_change: EventHandler<AnswerValue>,
) -> Element {
    let mut status = use_signal(SaveStatus::default);
    let mut generation = use_signal(|| 0u64);

    let is_correct = correct.as_deref() == Some(value.as_str());

    let input_class = if review {
        if is_correct {
            "answer__input answer__input--correct"
        } else {
            "answer__input answer__input--wrong"
        }
    } else {
        "answer__input"
    };

    rsx! {
        div { class: "answer answer--free-text",
            input {
                class: input_class,
                r#type: "text",
                value: "{value}",
                readonly: review,
                oninput: move |evt| {
                    let text = evt.value();
                    let current = generation() + 1;
                    generation.set(current);
                    status.set(SaveStatus::Saving);
                    on_change.call(AnswerValue::Text(text));
                    spawn(async move {
                        tokio::time::sleep(std::time::Duration::from_millis(SAVE_CONFIRM_MS))
                            .await;
                        // Only the latest edit may confirm.
                        if *generation.peek() == current {
                            status.set(SaveStatus::Saved);
                        }
                    });
                },
            }
            if !review {
                match status() {
                    SaveStatus::Idle => rsx! {},
                    SaveStatus::Saving => rsx! {
                        span { class: "answer__save-status", "Saving…" }
                    },
                    SaveStatus::Saved => rsx! {
                        span { class: "answer__save-status", "Saved" }
                    },
                }
            }
            if review && !is_correct {
                if let Some(correct) = correct {
                    p { class: "answer__correction", "Correct answer: {correct}" }
                }
            }
        }
    }
}
