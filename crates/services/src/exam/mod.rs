mod attempt;
mod progress;
mod workflow;

// Public API of the exam subsystem.
pub use crate::error::{AttemptError, ExamError};
pub use attempt::ExamAttempt;
pub use progress::AttemptProgress;
pub use workflow::{ExamFlowService, SubmitOutcome};
