//! Shared error types for the services crate.

use thiserror::Error;

use client::ApiError;
use exam_core::model::QuestionId;

/// Errors from building or mutating an exam attempt.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("problem set has no questions")]
    NoQuestions,

    #[error("duplicate question id {0}")]
    DuplicateQuestionId(QuestionId),
}

/// Errors emitted by the exam workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamError {
    #[error("attempt already submitted")]
    AlreadySubmitted,

    #[error(transparent)]
    Attempt(#[from] AttemptError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `ScoreboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScoreboardError {
    #[error(transparent)]
    Api(#[from] ApiError),
}
