use dioxus::prelude::*;

use exam_core::model::{AnswerValue, Fragment, FragmentDraft};

/// Fragment palette plus fixed answer slots. Each fragment can be consumed
/// once; a consumed fragment disappears from the palette and its text lands
/// in the next open slot. Reset clears the slots and the palette together.
///
/// The consumed-set is derived from the recorded answer on every render, so
/// a remount after navigation shows the same palette state.
#[component]
pub fn FragmentFillAnswer(
    fragments: Vec<Fragment>,
    slots: u32,
    correct: Option<Vec<String>>,
    filled: Vec<String>,
    review: bool,
    on_change: EventHandler<AnswerValue>,
) -> Element {
    let draft = rebuild_draft(&fragments, &filled);
    let slot_count = slots as usize;

    rsx! {
        div { class: "answer answer--fragment-fill",
            div { class: "fragment-slots",
                for index in 0..slot_count {
                    {
                        let entry = draft.filled().get(index);
                        let class = slot_class(index, entry, correct.as_deref(), review);
                        let display = entry.cloned().unwrap_or_else(|| "____".into());
                        rsx! {
                            span { class, "{display}" }
                        }
                    }
                }
            }
            if !review {
                div { class: "fragment-palette",
                    for fragment in fragments.clone() {
                        if !draft.is_consumed(fragment.id) {
                            {
                                let frag_id = fragment.id;
                                let frag_text = fragment.text.clone();
                                let fragments = fragments.clone();
                                let filled = filled.clone();
                                rsx! {
                                    button {
                                        class: "fragment-chip",
                                        onclick: move |_| {
                                            let mut next = rebuild_draft(&fragments, &filled);
                                            if next.filled_count() < slot_count {
                                                next.consume(frag_id, frag_text.clone());
                                                on_change.call(AnswerValue::Fragments(
                                                    next.filled().to_vec(),
                                                ));
                                            }
                                        },
                                        "{fragment.text}"
                                    }
                                }
                            }
                        }
                    }
                }
                button {
                    class: "btn btn-secondary fragment-reset",
                    onclick: move |_| on_change.call(AnswerValue::Fragments(Vec::new())),
                    "Reset"
                }
            }
        }
    }
}

/// Replays the recorded slot texts against the palette, consuming the first
/// still-free fragment that matches each text.
fn rebuild_draft(fragments: &[Fragment], filled: &[String]) -> FragmentDraft {
    let mut draft = FragmentDraft::new();
    for text in filled {
        let matching = fragments
            .iter()
            .find(|fragment| fragment.text == *text && !draft.is_consumed(fragment.id));
        if let Some(fragment) = matching {
            draft.consume(fragment.id, text.clone());
        }
    }
    draft
}

fn slot_class(
    index: usize,
    entry: Option<&String>,
    correct: Option<&[String]>,
    review: bool,
) -> &'static str {
    if !review {
        return if entry.is_some() {
            "fragment-slot fragment-slot--filled"
        } else {
            "fragment-slot"
        };
    }
    // Position-wise comparison against the reference.
    let expected = correct.and_then(|items| items.get(index));
    match (entry, expected) {
        (Some(got), Some(want)) if got == want => "fragment-slot fragment-slot--correct",
        (Some(_), _) => "fragment-slot fragment-slot--wrong",
        (None, _) => "fragment-slot fragment-slot--missed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::FragmentId;

    fn palette() -> Vec<Fragment> {
        vec![
            Fragment::new(FragmentId::new(1), "let"),
            Fragment::new(FragmentId::new(2), "mut"),
            Fragment::new(FragmentId::new(3), "let"),
        ]
    }

    #[test]
    fn rebuild_consumes_matching_fragments_in_order() {
        let draft = rebuild_draft(&palette(), &["let".into(), "mut".into()]);
        assert!(draft.is_consumed(FragmentId::new(1)));
        assert!(draft.is_consumed(FragmentId::new(2)));
        assert!(!draft.is_consumed(FragmentId::new(3)));
    }

    #[test]
    fn rebuild_handles_duplicate_texts() {
        let draft = rebuild_draft(&palette(), &["let".into(), "let".into()]);
        assert!(draft.is_consumed(FragmentId::new(1)));
        assert!(draft.is_consumed(FragmentId::new(3)));
        assert_eq!(draft.filled_count(), 2);
    }

    #[test]
    fn slot_class_compares_per_position() {
        let correct = vec!["let".into(), "mut".into()];
        let got = String::from("let");
        assert_eq!(
            slot_class(0, Some(&got), Some(&correct), true),
            "fragment-slot fragment-slot--correct"
        );
        assert_eq!(
            slot_class(1, Some(&got), Some(&correct), true),
            "fragment-slot fragment-slot--wrong"
        );
        assert_eq!(
            slot_class(1, None, Some(&correct), true),
            "fragment-slot fragment-slot--missed"
        );
    }
}
