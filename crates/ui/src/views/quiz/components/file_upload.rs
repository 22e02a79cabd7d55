use dioxus::prelude::*;

use exam_core::model::AnswerValue;

/// URL input for uploaded work. Only a valid absolute http(s) URL is
/// recorded; anything else keeps the previous answer and shows a hint.
#[component]
pub fn FileUploadAnswer(
    correct_url: Option<String>,
    value: String,
    review: bool,
    on_change: EventHandler<AnswerValue>,
) -> Element {
    let mut draft = use_signal(|| value.clone());
    let mut invalid = use_signal(|| false);

    // The draft tracks keystrokes that are not yet a valid URL, so it must
    // be reset whenever this widget is reused for another question.
    let mut last_value = use_signal(|| value.clone());
    if *last_value.peek() != value {
        last_value.set(value.clone());
        draft.set(value.clone());
        invalid.set(false);
    }

    let class = url_class(&value, correct_url.as_deref(), review);

    rsx! {
        div { class: "answer answer--file-upload",
            input {
                class,
                r#type: "url",
                placeholder: "https://…",
                value: "{draft}",
                disabled: review,
                oninput: move |event| {
                    let raw = event.value();
                    draft.set(raw.clone());
                    match AnswerValue::file_url(&raw) {
                        Ok(answer) => {
                            invalid.set(false);
                            on_change.call(answer);
                        }
                        Err(_) => invalid.set(!raw.trim().is_empty()),
                    }
                },
            }
            if invalid() && !review {
                span { class: "answer__hint", "Enter a full http or https link." }
            }
            if review {
                if let Some(expected) = correct_url.as_ref() {
                    span { class: "answer__reference", "Expected file: {expected}" }
                }
            }
        }
    }
}

fn url_class(value: &str, correct_url: Option<&str>, review: bool) -> &'static str {
    if !review {
        return "answer__input";
    }
    match correct_url {
        Some(expected) if expected == value => "answer__input answer__input--correct",
        Some(_) => "answer__input answer__input--wrong",
        None => "answer__input",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_compares_against_the_expected_url() {
        assert_eq!(
            url_class("https://cdn.example/a.pdf", Some("https://cdn.example/a.pdf"), true),
            "answer__input answer__input--correct"
        );
        assert_eq!(
            url_class("https://cdn.example/b.pdf", Some("https://cdn.example/a.pdf"), true),
            "answer__input answer__input--wrong"
        );
        assert_eq!(url_class("https://cdn.example/a.pdf", None, true), "answer__input");
    }

    #[test]
    fn edit_mode_never_grades() {
        assert_eq!(
            url_class("https://cdn.example/b.pdf", Some("https://cdn.example/a.pdf"), false),
            "answer__input"
        );
    }
}
