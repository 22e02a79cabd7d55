use async_trait::async_trait;
use chrono::{DateTime, Utc};
use exam_core::model::{AnswerSheet, AttemptReport, ProblemSetId, Question};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::http::{ApiConfig, HttpBackend};
use crate::sample::SampleBackend;

/// Errors surfaced by backend adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("unexpected http status {0}")]
    Status(u16),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

//
// ─── AUTH ──────────────────────────────────────────────────────────────────────
//

/// Result of a completed sign-in, passed explicitly to the HTTP backend.
///
/// The token never lives in ambient state and never appears in `Debug`
/// output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    token: String,
}

impl AuthSession {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession").finish_non_exhaustive()
    }
}

//
// ─── BOUNDARY VALUES ───────────────────────────────────────────────────────────
//

/// What the grading endpoint reports for an accepted submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReceipt {
    pub message: String,
    /// Absent while manual grading is still outstanding.
    pub score: Option<f64>,
}

/// Completion record of one section, shown on its catalog card.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionResult {
    pub score: f64,
    pub report: AttemptReport,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// One problem set as listed on the home screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOverview {
    pub id: ProblemSetId,
    pub title: String,
    pub slug: String,
    pub description: String,
    /// Present once the section has been completed.
    pub result: Option<SectionResult>,
}

/// One scoreboard row.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub rank: u32,
    pub username: String,
    pub score: f64,
    pub duration_mins: f64,
}

//
// ─── COLLABORATOR CONTRACTS ────────────────────────────────────────────────────
//

/// Supplies the ordered question list for one problem set.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch every question of the set, in exam order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown set, or other transport
    /// errors.
    async fn fetch_questions(&self, problem_set: ProblemSetId)
        -> Result<Vec<Question>, ApiError>;
}

/// Accepts a completed answer sheet for grading.
#[async_trait]
pub trait GradingSink: Send + Sync {
    /// Submit the full sheet for the set.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the submission is rejected or cannot reach
    /// the collaborator; the caller keeps the sheet and may retry.
    async fn submit_answers(
        &self,
        problem_set: ProblemSetId,
        sheet: &AnswerSheet,
    ) -> Result<SubmitReceipt, ApiError>;
}

/// Lists the available problem-set sections with completion results.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` when the list cannot be fetched.
    async fn list_sections(&self) -> Result<Vec<SectionOverview>, ApiError>;
}

/// Supplies the ranked standings for one problem set.
#[async_trait]
pub trait ScoreboardSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` when the standings cannot be fetched.
    async fn standings(&self, problem_set: ProblemSetId) -> Result<Vec<Standing>, ApiError>;
}

//
// ─── IN-MEMORY BACKEND ─────────────────────────────────────────────────────────
//

/// In-memory backend for tests and prototyping.
///
/// Holds canned data per problem set and can be told to fail submissions
/// to exercise retry paths.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    questions: Arc<Mutex<HashMap<ProblemSetId, Vec<Question>>>>,
    sections: Arc<Mutex<Vec<SectionOverview>>>,
    standings: Arc<Mutex<HashMap<ProblemSetId, Vec<Standing>>>>,
    submissions: Arc<Mutex<Vec<(ProblemSetId, AnswerSheet)>>>,
    fail_submits: Arc<Mutex<bool>>,
    submit_score: Arc<Mutex<Option<f64>>>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_questions(&self, problem_set: ProblemSetId, questions: Vec<Question>) {
        if let Ok(mut guard) = self.questions.lock() {
            guard.insert(problem_set, questions);
        }
    }

    pub fn put_sections(&self, sections: Vec<SectionOverview>) {
        if let Ok(mut guard) = self.sections.lock() {
            *guard = sections;
        }
    }

    pub fn put_standings(&self, problem_set: ProblemSetId, rows: Vec<Standing>) {
        if let Ok(mut guard) = self.standings.lock() {
            guard.insert(problem_set, rows);
        }
    }

    /// When set, every submission fails with a connection error.
    pub fn set_fail_submits(&self, fail: bool) {
        if let Ok(mut guard) = self.fail_submits.lock() {
            *guard = fail;
        }
    }

    /// Score returned by accepted submissions.
    pub fn set_submit_score(&self, score: Option<f64>) {
        if let Ok(mut guard) = self.submit_score.lock() {
            *guard = score;
        }
    }

    /// Sheets accepted so far, oldest first.
    #[must_use]
    pub fn submissions(&self) -> Vec<(ProblemSetId, AnswerSheet)> {
        self.submissions
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl QuestionSource for InMemoryBackend {
    async fn fetch_questions(
        &self,
        problem_set: ProblemSetId,
    ) -> Result<Vec<Question>, ApiError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        guard.get(&problem_set).cloned().ok_or(ApiError::NotFound)
    }
}

#[async_trait]
impl GradingSink for InMemoryBackend {
    async fn submit_answers(
        &self,
        problem_set: ProblemSetId,
        sheet: &AnswerSheet,
    ) -> Result<SubmitReceipt, ApiError> {
        let failing = self
            .fail_submits
            .lock()
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        if *failing {
            return Err(ApiError::Connection("injected submit failure".into()));
        }
        drop(failing);

        let mut guard = self
            .submissions
            .lock()
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        guard.push((problem_set, sheet.clone()));

        let score = self
            .submit_score
            .lock()
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        Ok(SubmitReceipt {
            message: "answers received".into(),
            score: *score,
        })
    }
}

#[async_trait]
impl CatalogSource for InMemoryBackend {
    async fn list_sections(&self) -> Result<Vec<SectionOverview>, ApiError> {
        let guard = self
            .sections
            .lock()
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl ScoreboardSource for InMemoryBackend {
    async fn standings(&self, problem_set: ProblemSetId) -> Result<Vec<Standing>, ApiError> {
        let guard = self
            .standings
            .lock()
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        guard.get(&problem_set).cloned().ok_or(ApiError::NotFound)
    }
}

//
// ─── BACKEND AGGREGATE ─────────────────────────────────────────────────────────
//

/// Aggregates the four collaborators behind trait objects for easy backend
/// swapping.
#[derive(Clone)]
pub struct Backend {
    pub questions: Arc<dyn QuestionSource>,
    pub grading: Arc<dyn GradingSink>,
    pub catalog: Arc<dyn CatalogSource>,
    pub scoreboard: Arc<dyn ScoreboardSource>,
}

impl Backend {
    /// Empty in-memory backend, mostly useful in tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryBackend::new())
    }

    /// Wraps an already-populated in-memory backend.
    #[must_use]
    pub fn from_in_memory(backend: InMemoryBackend) -> Self {
        Self {
            questions: Arc::new(backend.clone()),
            grading: Arc::new(backend.clone()),
            catalog: Arc::new(backend.clone()),
            scoreboard: Arc::new(backend),
        }
    }

    /// Embedded demo data, graded locally. Works without any server.
    #[must_use]
    pub fn sample() -> Self {
        let backend = SampleBackend::new();
        Self {
            questions: Arc::new(backend.clone()),
            grading: Arc::new(backend.clone()),
            catalog: Arc::new(backend.clone()),
            scoreboard: Arc::new(backend),
        }
    }

    /// Remote REST backend.
    #[must_use]
    pub fn http(config: ApiConfig) -> Self {
        let backend = HttpBackend::new(config);
        Self {
            questions: Arc::new(backend.clone()),
            grading: Arc::new(backend.clone()),
            catalog: Arc::new(backend.clone()),
            scoreboard: Arc::new(backend),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{AnswerValue, QuestionId, QuestionKind};

    fn free_text(id: u64) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("question {id}"),
            QuestionKind::FreeText { correct: None },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_returns_not_found_for_unknown_set() {
        let backend = InMemoryBackend::new();
        let err = backend
            .fetch_questions(ProblemSetId::new(9))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn submit_records_the_sheet() {
        let backend = InMemoryBackend::new();
        backend.put_questions(ProblemSetId::new(1), vec![free_text(1)]);
        backend.set_submit_score(Some(80.0));

        let mut sheet = AnswerSheet::new();
        sheet.record(QuestionId::new(1), AnswerValue::Text("hi".into()));

        let receipt = backend
            .submit_answers(ProblemSetId::new(1), &sheet)
            .await
            .unwrap();
        assert_eq!(receipt.score, Some(80.0));

        let submissions = backend.submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].1, sheet);
    }

    #[tokio::test]
    async fn injected_failure_rejects_submission() {
        let backend = InMemoryBackend::new();
        backend.set_fail_submits(true);

        let err = backend
            .submit_answers(ProblemSetId::new(1), &AnswerSheet::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Connection(_)));
        assert!(backend.submissions().is_empty());
    }
}
