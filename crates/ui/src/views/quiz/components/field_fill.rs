use dioxus::prelude::*;

use exam_core::model::AnswerValue;

/// One text input per answer field. The emitted vector always has one
/// entry per field so positions stay aligned with the reference answers.
#[component]
pub fn FieldFillAnswer(
    fields: u32,
    correct: Option<Vec<String>>,
    values: Vec<String>,
    review: bool,
    on_change: EventHandler<AnswerValue>,
) -> Element {
    let field_count = fields as usize;

    rsx! {
        div { class: "answer answer--field-fill",
            for index in 0..field_count {
                {
                    let entry = values.get(index).cloned().unwrap_or_default();
                    let class = field_class(index, &entry, correct.as_deref(), review);
                    let values = values.clone();
                    rsx! {
                        div { class: "answer__field",
                            span { class: "answer__field-label", "Field {index + 1}" }
                            input {
                                class,
                                r#type: "text",
                                value: "{entry}",
                                disabled: review,
                                oninput: move |event| {
                                    on_change.call(AnswerValue::Fields(with_entry(
                                        &values,
                                        field_count,
                                        index,
                                        event.value(),
                                    )));
                                },
                            }
                            if review {
                                if let Some(expected) = correct.as_ref().and_then(|c| c.get(index)) {
                                    span { class: "answer__reference", "Correct answer: {expected}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Copies the current entries, pads to the field count, and replaces the
/// edited position.
fn with_entry(values: &[String], field_count: usize, index: usize, entry: String) -> Vec<String> {
    let mut next: Vec<String> = values.to_vec();
    next.resize(field_count, String::new());
    if index < next.len() {
        next[index] = entry;
    }
    next
}

fn field_class(index: usize, entry: &str, correct: Option<&[String]>, review: bool) -> &'static str {
    if !review {
        return "answer__input";
    }
    match correct.and_then(|c| c.get(index)) {
        Some(expected) if expected == entry => "answer__input answer__input--correct",
        Some(_) => "answer__input answer__input--wrong",
        None => "answer__input",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_entry_pads_to_the_field_count() {
        let next = with_entry(&[], 3, 2, "c".into());
        assert_eq!(next, vec![String::new(), String::new(), "c".to_string()]);
    }

    #[test]
    fn with_entry_replaces_only_the_edited_position() {
        let current = vec!["a".to_string(), "b".to_string()];
        let next = with_entry(&current, 2, 0, "z".into());
        assert_eq!(next, vec!["z".to_string(), "b".to_string()]);
    }

    #[test]
    fn review_classes_compare_position_wise() {
        let correct = vec!["alpha".to_string(), "beta".to_string()];
        assert_eq!(
            field_class(0, "alpha", Some(&correct), true),
            "answer__input answer__input--correct"
        );
        assert_eq!(
            field_class(1, "alpha", Some(&correct), true),
            "answer__input answer__input--wrong"
        );
        assert_eq!(field_class(2, "x", Some(&correct), true), "answer__input");
        assert_eq!(field_class(0, "anything", Some(&correct), false), "answer__input");
    }
}
