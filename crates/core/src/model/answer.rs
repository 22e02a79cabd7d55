use std::collections::BTreeMap;
use thiserror::Error;
use url::Url;

use crate::model::ids::{FragmentId, OptionId, QuestionId, StatementId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("file answer must be a valid http(s) URL")]
    InvalidFileUrl,
}

//
// ─── ANSWER VALUES ─────────────────────────────────────────────────────────────
//

/// The recorded answer for one question, shaped per question kind.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerValue {
    /// Single-choice selection.
    Choice(OptionId),
    /// Multi-choice selections in the order they were toggled on.
    Choices(Vec<OptionId>),
    /// Free-text line.
    Text(String),
    /// Fragment-fill blanks, one picked fragment text per slot.
    Fragments(Vec<String>),
    /// Field-fill entries, one per field position.
    Fields(Vec<String>),
    /// URL of the uploaded file.
    FileUrl(String),
    /// Boolean grid, keyed by statement.
    Booleans(BTreeMap<StatementId, bool>),
    /// Source code text.
    Code(String),
}

impl AnswerValue {
    /// Builds a file answer after checking the URL parses as http(s).
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::InvalidFileUrl` for anything that is not an
    /// absolute http or https URL.
    pub fn file_url(raw: impl AsRef<str>) -> Result<Self, AnswerError> {
        let s = raw.as_ref().trim();
        let url = Url::parse(s).map_err(|_| AnswerError::InvalidFileUrl)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AnswerError::InvalidFileUrl);
        }
        Ok(AnswerValue::FileUrl(url.to_string()))
    }

    /// Whether this value counts as blank for grading and progress.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Choice(_) => false,
            AnswerValue::Choices(ids) => ids.is_empty(),
            AnswerValue::Text(s) | AnswerValue::Code(s) | AnswerValue::FileUrl(s) => s.is_empty(),
            AnswerValue::Fragments(items) | AnswerValue::Fields(items) => {
                items.iter().all(String::is_empty)
            }
            AnswerValue::Booleans(map) => map.is_empty(),
        }
    }
}

//
// ─── ANSWER SHEET ──────────────────────────────────────────────────────────────
//

/// All answers recorded so far, keyed by question.
///
/// Writing replaces any prior value for that question; reading never
/// mutates. Ordering is by question id so serialization and iteration
/// are deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSheet {
    entries: BTreeMap<QuestionId, AnswerValue>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` for `question_id`, replacing any earlier value.
    pub fn record(&mut self, question_id: QuestionId, value: AnswerValue) {
        self.entries.insert(question_id, value);
    }

    #[must_use]
    pub fn get(&self, question_id: QuestionId) -> Option<&AnswerValue> {
        self.entries.get(&question_id)
    }

    #[must_use]
    pub fn contains(&self, question_id: QuestionId) -> bool {
        self.entries.contains_key(&question_id)
    }

    /// Count of questions holding a non-empty value.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.entries.values().filter(|v| !v.is_empty()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &AnswerValue)> {
        self.entries.iter().map(|(id, v)| (*id, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//
// ─── DRAFT HELPERS ─────────────────────────────────────────────────────────────
//

/// Multi-choice toggle: removes `option` if present, appends it otherwise.
/// Stored order is the order options were toggled on.
#[must_use]
pub fn toggle_option(mut selected: Vec<OptionId>, option: OptionId) -> Vec<OptionId> {
    if let Some(pos) = selected.iter().position(|id| *id == option) {
        selected.remove(pos);
    } else {
        selected.push(option);
    }
    selected
}

/// Working state of a fragment-fill answer.
///
/// Each fragment may be consumed at most once; `reset` clears the filled
/// slots and the consumed set together so the pool and the answer never
/// disagree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FragmentDraft {
    consumed: Vec<FragmentId>,
    filled: Vec<String>,
}

impl FragmentDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes `id`, appending `text` to the next open slot. A fragment
    /// already consumed is a no-op.
    pub fn consume(&mut self, id: FragmentId, text: impl Into<String>) {
        if self.is_consumed(id) {
            return;
        }
        self.consumed.push(id);
        self.filled.push(text.into());
    }

    /// Clears consumed fragments and filled slots atomically.
    pub fn reset(&mut self) {
        self.consumed.clear();
        self.filled.clear();
    }

    #[must_use]
    pub fn is_consumed(&self, id: FragmentId) -> bool {
        self.consumed.contains(&id)
    }

    #[must_use]
    pub fn consumed(&self) -> &[FragmentId] {
        &self.consumed
    }

    #[must_use]
    pub fn filled(&self) -> &[String] {
        &self.filled
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.filled.len()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_replaces_prior_value() {
        let mut sheet = AnswerSheet::new();
        sheet.record(QuestionId::new(1), AnswerValue::Text("first".into()));
        sheet.record(QuestionId::new(1), AnswerValue::Text("second".into()));

        assert_eq!(sheet.len(), 1);
        assert_eq!(
            sheet.get(QuestionId::new(1)),
            Some(&AnswerValue::Text("second".into()))
        );
    }

    #[test]
    fn record_leaves_other_questions_untouched() {
        let mut sheet = AnswerSheet::new();
        sheet.record(QuestionId::new(1), AnswerValue::Choice(OptionId::new(3)));
        sheet.record(QuestionId::new(2), AnswerValue::Text("hi".into()));

        sheet.record(QuestionId::new(2), AnswerValue::Text("edited".into()));

        assert_eq!(
            sheet.get(QuestionId::new(1)),
            Some(&AnswerValue::Choice(OptionId::new(3)))
        );
    }

    #[test]
    fn toggle_adds_then_removes() {
        let a = OptionId::new(1);
        let b = OptionId::new(2);

        let selected = toggle_option(Vec::new(), a);
        assert_eq!(selected, vec![a]);

        let selected = toggle_option(selected, b);
        assert_eq!(selected, vec![a, b]);

        let selected = toggle_option(selected, a);
        assert_eq!(selected, vec![b]);
    }

    #[test]
    fn double_toggle_restores_original_set() {
        let a = OptionId::new(1);
        let b = OptionId::new(2);
        let original = vec![a];

        let toggled = toggle_option(original.clone(), b);
        let restored = toggle_option(toggled, b);

        assert_eq!(restored, original);
    }

    #[test]
    fn toggle_preserves_insertion_order() {
        let ids: Vec<OptionId> = [3u64, 1, 2].iter().map(|n| OptionId::new(*n)).collect();
        let mut selected = Vec::new();
        for id in &ids {
            selected = toggle_option(selected, *id);
        }
        assert_eq!(selected, ids);
    }

    #[test]
    fn fragment_consumed_only_once() {
        let mut draft = FragmentDraft::new();
        draft.consume(FragmentId::new(1), "let");
        draft.consume(FragmentId::new(1), "let");

        assert_eq!(draft.filled(), ["let"]);
        assert_eq!(draft.consumed(), [FragmentId::new(1)]);
    }

    #[test]
    fn fragment_reset_clears_pool_and_slots_together() {
        let mut draft = FragmentDraft::new();
        draft.consume(FragmentId::new(1), "let");
        draft.consume(FragmentId::new(2), "mut");

        draft.reset();

        assert!(draft.filled().is_empty());
        assert!(!draft.is_consumed(FragmentId::new(1)));
        assert!(!draft.is_consumed(FragmentId::new(2)));

        draft.consume(FragmentId::new(1), "let");
        assert_eq!(draft.filled(), ["let"]);
    }

    #[test]
    fn file_url_requires_http_scheme() {
        assert!(AnswerValue::file_url("https://cdn.example/answer.pdf").is_ok());
        assert_eq!(
            AnswerValue::file_url("ftp://cdn.example/a.pdf").unwrap_err(),
            AnswerError::InvalidFileUrl
        );
        assert_eq!(
            AnswerValue::file_url("not a url").unwrap_err(),
            AnswerError::InvalidFileUrl
        );
    }

    #[test]
    fn empty_values_count_as_blank() {
        assert!(AnswerValue::Text(String::new()).is_empty());
        assert!(AnswerValue::Choices(Vec::new()).is_empty());
        assert!(AnswerValue::Booleans(BTreeMap::new()).is_empty());
        assert!(!AnswerValue::Choice(OptionId::new(1)).is_empty());

        let mut sheet = AnswerSheet::new();
        sheet.record(QuestionId::new(1), AnswerValue::Text(String::new()));
        sheet.record(QuestionId::new(2), AnswerValue::Text("x".into()));
        assert_eq!(sheet.answered_count(), 1);
    }
}
