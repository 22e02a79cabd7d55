#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod exam;
pub mod scoreboard;

pub use exam_core::Clock;

pub use catalog::CatalogService;
pub use error::{AttemptError, CatalogError, ExamError, ScoreboardError};
pub use exam::{AttemptProgress, ExamAttempt, ExamFlowService, SubmitOutcome};
pub use scoreboard::ScoreboardService;
