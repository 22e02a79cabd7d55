use chrono::{DateTime, Utc};
use std::fmt;

use exam_core::model::{
    AnswerSheet, AnswerValue, AttemptReport, ProblemSetId, Question, QuestionId,
};

use super::progress::AttemptProgress;
use crate::error::AttemptError;

//
// ─── ATTEMPT ───────────────────────────────────────────────────────────────────
//

/// One in-memory exam attempt: the loaded question list plus everything the
/// user has answered so far.
///
/// The attempt is the single owner of the answer sheet. Views propose new
/// values through [`record_answer`](Self::record_answer); once the attempt is
/// marked reviewed the sheet is frozen and every further write is a no-op.
pub struct ExamAttempt {
    problem_set: ProblemSetId,
    questions: Vec<Question>,
    sheet: AnswerSheet,
    started_at: DateTime<Utc>,
    reviewed_at: Option<DateTime<Utc>>,
    score: Option<f64>,
}

impl ExamAttempt {
    /// Builds an attempt over the fetched question list.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::NoQuestions` for an empty list and
    /// `AttemptError::DuplicateQuestionId` when two questions share an id.
    pub fn new(
        problem_set: ProblemSetId,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, AttemptError> {
        if questions.is_empty() {
            return Err(AttemptError::NoQuestions);
        }
        for (index, question) in questions.iter().enumerate() {
            if questions[..index].iter().any(|q| q.id() == question.id()) {
                return Err(AttemptError::DuplicateQuestionId(question.id()));
            }
        }

        Ok(Self {
            problem_set,
            questions,
            sheet: AnswerSheet::new(),
            started_at,
            reviewed_at: None,
            score: None,
        })
    }

    #[must_use]
    pub fn problem_set(&self) -> ProblemSetId {
        self.problem_set
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn reviewed_at(&self) -> Option<DateTime<Utc>> {
        self.reviewed_at
    }

    /// Score reported by the grading collaborator, if it sent one.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    #[must_use]
    pub fn sheet(&self) -> &AnswerSheet {
        &self.sheet
    }

    #[must_use]
    pub fn answer(&self, question_id: QuestionId) -> Option<&AnswerValue> {
        self.sheet.get(question_id)
    }

    /// Resolves the question shown at page number `number`.
    ///
    /// Matching is by question id, not list position; a number past the
    /// loaded set yields `None` so the view can render its placeholder.
    #[must_use]
    pub fn question_by_number(&self, number: u64) -> Option<&Question> {
        self.questions
            .iter()
            .find(|q| q.id() == QuestionId::new(number))
    }

    /// Records `value` for `question_id`, replacing any prior value.
    ///
    /// Returns `false` and leaves the sheet untouched once the attempt is
    /// reviewed, or when the question is not part of this set.
    pub fn record_answer(&mut self, question_id: QuestionId, value: AnswerValue) -> bool {
        if self.is_reviewed() {
            return false;
        }
        if !self.questions.iter().any(|q| q.id() == question_id) {
            return false;
        }
        self.sheet.record(question_id, value);
        true
    }

    #[must_use]
    pub fn is_reviewed(&self) -> bool {
        self.reviewed_at.is_some()
    }

    /// Flips the attempt into review mode. One-way: calling it again keeps
    /// the first timestamp and score.
    pub(crate) fn mark_reviewed(&mut self, score: Option<f64>, at: DateTime<Utc>) {
        if self.reviewed_at.is_none() {
            self.reviewed_at = Some(at);
            self.score = score;
        }
    }

    /// Returns a summary of the current attempt progress.
    #[must_use]
    pub fn progress(&self) -> AttemptProgress {
        let total = self.questions.len();
        let answered = self.sheet.answered_count();
        AttemptProgress {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_reviewed: self.is_reviewed(),
        }
    }

    /// Verdict counts over the whole set, for the review banner.
    #[must_use]
    pub fn report(&self) -> AttemptReport {
        AttemptReport::tally(&self.questions, &self.sheet)
    }
}

impl fmt::Debug for ExamAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExamAttempt")
            .field("problem_set", &self.problem_set)
            .field("questions_len", &self.questions.len())
            .field("answered", &self.sheet.answered_count())
            .field("started_at", &self.started_at)
            .field("reviewed_at", &self.reviewed_at)
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
