use exam_core::model::{AnswerSheet, AnswerValue, AttemptReport, ProblemSetId, Question, QuestionId};
use services::{AttemptError, AttemptProgress, ExamAttempt, ExamError, ExamFlowService};

use crate::views::ViewError;

/// Everything the quiz view can ask of the session.
#[derive(Clone, Debug, PartialEq)]
pub enum QuizIntent {
    /// Propose a new value for one question. Dropped once review mode is set.
    Answer(QuestionId, AnswerValue),
    /// Send the whole sheet for grading. Ignored while a submission is in
    /// flight and after review.
    Submit,
}

/// View-model wrapper around the exam attempt state machine.
pub struct ExamVm {
    attempt: ExamAttempt,
}

impl ExamVm {
    #[must_use]
    pub fn new(attempt: ExamAttempt) -> Self {
        Self { attempt }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        self.attempt.questions()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.attempt.total_questions()
    }

    #[must_use]
    pub fn question_by_number(&self, number: u64) -> Option<&Question> {
        self.attempt.question_by_number(number)
    }

    #[must_use]
    pub fn answer_for(&self, question_id: QuestionId) -> Option<AnswerValue> {
        self.attempt.answer(question_id).cloned()
    }

    /// Question numbers that currently hold a non-empty answer.
    #[must_use]
    pub fn answered_numbers(&self) -> Vec<u64> {
        self.attempt
            .sheet()
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(id, _)| id.value())
            .collect()
    }

    pub fn record(&mut self, question_id: QuestionId, value: AnswerValue) -> bool {
        self.attempt.record_answer(question_id, value)
    }

    #[must_use]
    pub fn is_reviewed(&self) -> bool {
        self.attempt.is_reviewed()
    }

    #[must_use]
    pub fn score(&self) -> Option<f64> {
        self.attempt.score()
    }

    #[must_use]
    pub fn progress(&self) -> AttemptProgress {
        self.attempt.progress()
    }

    #[must_use]
    pub fn report(&self) -> AttemptReport {
        self.attempt.report()
    }

    /// Snapshot of what a submission sends: the set id plus the sheet as it
    /// stands right now. The attempt itself stays in place, so answers
    /// recorded while the submission is in flight are kept; they just miss
    /// the graded snapshot.
    #[must_use]
    pub fn submit_payload(&self) -> (ProblemSetId, AnswerSheet) {
        (self.attempt.problem_set(), self.attempt.sheet().clone())
    }

    /// Applies an accepted submission, flipping the attempt into review mode.
    pub fn finish(&mut self, flow: &ExamFlowService, score: Option<f64>) {
        flow.finish_attempt(&mut self.attempt, score);
    }
}

/// # Errors
///
/// Returns `ViewError::EmptyProblemSet` when the set has no questions.
/// Returns `ViewError::Unknown` for other load failures.
pub async fn start_attempt(
    flow: &ExamFlowService,
    problem_set: ProblemSetId,
) -> Result<ExamVm, ViewError> {
    let attempt = match flow.start_attempt(problem_set).await {
        Ok(attempt) => attempt,
        Err(ExamError::Attempt(AttemptError::NoQuestions)) => {
            return Err(ViewError::EmptyProblemSet);
        }
        Err(_) => return Err(ViewError::Unknown),
    };

    Ok(ExamVm::new(attempt))
}

/// Prev/next page math. Out-of-range targets yield `None` so the buttons
/// disable at the boundaries instead of navigating.
#[must_use]
pub fn nav_target(current: u64, total: usize, delta: i64) -> Option<u64> {
    let current = i64::try_from(current).ok()?;
    let total = i64::try_from(total).ok()?;
    let next = current.checked_add(delta)?;
    if (1..=total).contains(&next) {
        u64::try_from(next).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_target_moves_within_bounds() {
        assert_eq!(nav_target(2, 5, 1), Some(3));
        assert_eq!(nav_target(2, 5, -1), Some(1));
    }

    #[test]
    fn nav_target_refuses_the_boundaries() {
        assert_eq!(nav_target(1, 5, -1), None);
        assert_eq!(nav_target(5, 5, 1), None);
        assert_eq!(nav_target(1, 0, 1), None);
    }
}
