use dioxus::prelude::*;

use exam_core::model::AnswerValue;

/// Plain textarea for code answers. Grading is manual, so review mode only
/// freezes the text and notes that the verdict is pending.
#[component]
pub fn CodeEditorAnswer(
    language: String,
    value: String,
    review: bool,
    on_change: EventHandler<AnswerValue>,
) -> Element {
    rsx! {
        div { class: "answer answer--code-editor",
            span { class: "answer__language", "Language: {language}" }
            textarea {
                class: "answer__code",
                spellcheck: "false",
                rows: 14,
                value: "{value}",
                readonly: review,
                oninput: move |event| on_change.call(AnswerValue::Code(event.value())),
            }
            if review {
                p { class: "answer__pending-note", "This answer is graded by hand." }
            }
        }
    }
}
