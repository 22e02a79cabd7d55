use std::collections::BTreeMap;

use dioxus::prelude::*;

use exam_core::model::{AnswerValue, Statement, StatementId};

/// True/False grid. Each statement carries at most one mark; marking the
/// other column replaces the previous one. Unmarked rows simply stay out of
/// the map.
#[component]
pub fn BooleanGridAnswer(
    statements: Vec<Statement>,
    correct: Option<BTreeMap<StatementId, bool>>,
    marks: BTreeMap<StatementId, bool>,
    review: bool,
    on_change: EventHandler<AnswerValue>,
) -> Element {
    rsx! {
        table { class: "answer answer--boolean-grid",
            thead {
                tr {
                    th { "Statement" }
                    th { "True" }
                    th { "False" }
                }
            }
            tbody {
                for statement in statements {
                    {
                        let id = statement.id;
                        let mark = marks.get(&id).copied();
                        let class = row_class(mark, correct.as_ref().and_then(|c| c.get(&id)).copied(), review);
                        let marks_true = marks.clone();
                        let marks_false = marks.clone();
                        rsx! {
                            tr { class,
                                td { class: "statement__text", "{statement.text}" }
                                td {
                                    input {
                                        r#type: "radio",
                                        checked: mark == Some(true),
                                        disabled: review,
                                        onchange: move |_| {
                                            let mut next = marks_true.clone();
                                            next.insert(id, true);
                                            on_change.call(AnswerValue::Booleans(next));
                                        },
                                    }
                                }
                                td {
                                    input {
                                        r#type: "radio",
                                        checked: mark == Some(false),
                                        disabled: review,
                                        onchange: move |_| {
                                            let mut next = marks_false.clone();
                                            next.insert(id, false);
                                            on_change.call(AnswerValue::Booleans(next));
                                        },
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn row_class(mark: Option<bool>, expected: Option<bool>, review: bool) -> &'static str {
    if !review {
        return "grid-row";
    }
    match (mark, expected) {
        (Some(m), Some(e)) if m == e => "grid-row grid-row--correct",
        (_, Some(_)) => "grid-row grid-row--wrong",
        _ => "grid-row",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_grades_each_row_against_the_key() {
        assert_eq!(row_class(Some(true), Some(true), true), "grid-row grid-row--correct");
        assert_eq!(row_class(Some(false), Some(true), true), "grid-row grid-row--wrong");
        assert_eq!(row_class(None, Some(true), true), "grid-row grid-row--wrong");
        assert_eq!(row_class(Some(true), None, true), "grid-row");
    }

    #[test]
    fn edit_mode_keeps_rows_neutral() {
        assert_eq!(row_class(Some(true), Some(false), false), "grid-row");
    }
}
