use std::collections::BTreeSet;

use crate::model::answer::{AnswerSheet, AnswerValue};
use crate::model::question::{Question, QuestionKind};

//
// ─── VERDICT ───────────────────────────────────────────────────────────────────
//

/// Review-mode judgement for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// Nothing recorded, or only an empty value.
    Blank,
    /// No reference to compare against (code editor questions, unknown
    /// kinds, or a live exam that withholds the key).
    Pending,
}

/// Judges a recorded answer against the question's correct reference.
///
/// Blank wins over Pending: an unanswered question is blank even when no
/// reference exists. A stored value whose shape does not match the question
/// kind is judged incorrect rather than panicking.
#[must_use]
pub fn judge(question: &Question, value: Option<&AnswerValue>) -> Verdict {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Verdict::Blank,
    };

    match question.kind() {
        QuestionKind::SingleChoice {
            correct: Some(correct),
            ..
        } => match value {
            AnswerValue::Choice(picked) => verdict_eq(picked == correct),
            _ => Verdict::Incorrect,
        },
        QuestionKind::MultiChoice {
            correct: Some(correct),
            ..
        } => match value {
            AnswerValue::Choices(picked) => {
                let picked: BTreeSet<_> = picked.iter().collect();
                let expected: BTreeSet<_> = correct.iter().collect();
                verdict_eq(picked == expected)
            }
            _ => Verdict::Incorrect,
        },
        QuestionKind::FreeText {
            correct: Some(correct),
        } => match value {
            AnswerValue::Text(text) => verdict_eq(text == correct),
            _ => Verdict::Incorrect,
        },
        QuestionKind::FragmentFill {
            correct: Some(correct),
            ..
        } => match value {
            AnswerValue::Fragments(filled) => verdict_eq(filled == correct),
            _ => Verdict::Incorrect,
        },
        QuestionKind::FieldFill {
            correct: Some(correct),
            ..
        } => match value {
            AnswerValue::Fields(entries) => verdict_eq(entries == correct),
            _ => Verdict::Incorrect,
        },
        QuestionKind::FileUpload {
            correct_url: Some(correct),
        } => match value {
            AnswerValue::FileUrl(url) => verdict_eq(url == correct),
            _ => Verdict::Incorrect,
        },
        QuestionKind::BooleanGrid {
            correct: Some(correct),
            ..
        } => match value {
            AnswerValue::Booleans(marks) => verdict_eq(marks == correct),
            _ => Verdict::Incorrect,
        },
        _ => Verdict::Pending,
    }
}

fn verdict_eq(matched: bool) -> Verdict {
    if matched {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

/// Verdict counts over a whole attempt, shown on the results block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttemptReport {
    pub correct: usize,
    pub wrong: usize,
    pub blank: usize,
    pub pending: usize,
}

impl AttemptReport {
    /// Tallies verdicts for every question in the set.
    #[must_use]
    pub fn tally(questions: &[Question], sheet: &AnswerSheet) -> Self {
        let mut report = Self::default();
        for question in questions {
            match judge(question, sheet.get(question.id())) {
                Verdict::Correct => report.correct += 1,
                Verdict::Incorrect => report.wrong += 1,
                Verdict::Blank => report.blank += 1,
                Verdict::Pending => report.pending += 1,
            }
        }
        report
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.correct + self.wrong + self.blank + self.pending
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
