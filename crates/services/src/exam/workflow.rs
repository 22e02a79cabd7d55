use std::sync::Arc;

use client::{GradingSink, QuestionSource};
use exam_core::model::{AnswerSheet, ProblemSetId};

use super::attempt::ExamAttempt;
use crate::Clock;
use crate::error::ExamError;

/// What the grading collaborator reported for an accepted submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub message: String,
    pub score: Option<f64>,
}

/// Orchestrates attempt start and submission over the remote collaborators.
#[derive(Clone)]
pub struct ExamFlowService {
    clock: Clock,
    questions: Arc<dyn QuestionSource>,
    grading: Arc<dyn GradingSink>,
}

impl ExamFlowService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionSource>,
        grading: Arc<dyn GradingSink>,
    ) -> Self {
        Self {
            clock,
            questions,
            grading,
        }
    }

    /// Fetches the question list and opens a fresh attempt.
    ///
    /// # Errors
    ///
    /// Returns `ExamError` when the fetch fails or the set is unusable.
    /// Load failures are fatal to the session; the caller shows an error
    /// state instead of retrying.
    pub async fn start_attempt(&self, problem_set: ProblemSetId) -> Result<ExamAttempt, ExamError> {
        let questions = self.questions.fetch_questions(problem_set).await?;
        let attempt = ExamAttempt::new(problem_set, questions, self.clock.now())?;
        tracing::info!(
            %problem_set,
            questions = attempt.total_questions(),
            "attempt started"
        );
        Ok(attempt)
    }

    /// Sends an answer sheet snapshot for grading.
    ///
    /// Touches no attempt state, so callers that cannot hold the attempt
    /// across the await grade a clone of the sheet and apply the outcome with
    /// [`finish_attempt`](Self::finish_attempt) afterwards. Answers recorded
    /// while the call is in flight are kept but miss the graded snapshot.
    ///
    /// # Errors
    ///
    /// Returns the collaborator error for a rejected submission.
    pub async fn submit_sheet(
        &self,
        problem_set: ProblemSetId,
        sheet: &AnswerSheet,
    ) -> Result<SubmitOutcome, ExamError> {
        let receipt = match self.grading.submit_answers(problem_set, sheet).await {
            Ok(receipt) => receipt,
            Err(err) => {
                tracing::warn!(%problem_set, %err, "submission failed, attempt stays editable");
                return Err(err.into());
            }
        };
        tracing::info!(%problem_set, score = ?receipt.score, "sheet accepted for grading");

        Ok(SubmitOutcome {
            message: receipt.message,
            score: receipt.score,
        })
    }

    /// Flips an attempt into review mode after an accepted submission.
    pub fn finish_attempt(&self, attempt: &mut ExamAttempt, score: Option<f64>) {
        attempt.mark_reviewed(score, self.clock.now());
    }

    /// Sends the full answer sheet for grading and, on success, flips the
    /// attempt into review mode. On failure the attempt is left untouched so
    /// the user can resubmit the same sheet.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::AlreadySubmitted` if the attempt is already in
    /// review mode, or the collaborator error for a rejected submission.
    pub async fn submit(&self, attempt: &mut ExamAttempt) -> Result<SubmitOutcome, ExamError> {
        if attempt.is_reviewed() {
            return Err(ExamError::AlreadySubmitted);
        }

        let outcome = self
            .submit_sheet(attempt.problem_set(), attempt.sheet())
            .await?;
        self.finish_attempt(attempt, outcome.score);

        Ok(outcome)
    }
}
