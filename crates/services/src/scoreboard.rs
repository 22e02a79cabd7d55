use std::sync::Arc;

use client::{ScoreboardSource, Standing};
use exam_core::model::ProblemSetId;

use crate::error::ScoreboardError;

/// Read model for a problem set's ranked standings.
#[derive(Clone)]
pub struct ScoreboardService {
    scoreboard: Arc<dyn ScoreboardSource>,
}

impl ScoreboardService {
    #[must_use]
    pub fn new(scoreboard: Arc<dyn ScoreboardSource>) -> Self {
        Self { scoreboard }
    }

    /// Fetches the standings, ordered by rank.
    ///
    /// # Errors
    ///
    /// Returns `ScoreboardError` when the collaborator cannot be reached.
    pub async fn standings(
        &self,
        problem_set: ProblemSetId,
    ) -> Result<Vec<Standing>, ScoreboardError> {
        Ok(self.scoreboard.standings(problem_set).await?)
    }
}
