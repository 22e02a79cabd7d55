use client::Standing;

use super::time_fmt::format_duration_mins;

/// One rendered scoreboard row.
#[derive(Clone, Debug, PartialEq)]
pub struct StandingVm {
    pub rank: u32,
    pub username: String,
    pub score: String,
    pub duration: String,
}

#[must_use]
pub fn map_standings(standings: Vec<Standing>) -> Vec<StandingVm> {
    standings
        .into_iter()
        .map(|standing| StandingVm {
            rank: standing.rank,
            username: standing.username,
            score: format!("{:.1}", standing.score),
            duration: format_duration_mins(standing.duration_mins),
        })
        .collect()
}
