mod home;
mod quiz;
mod scoreboard;
mod state;

pub use home::HomeView;
pub use quiz::QuizView;
pub use scoreboard::ScoreboardView;
pub use state::{ViewError, ViewState, view_state_from_resource};

#[cfg(test)]
pub(crate) mod test_harness;
#[cfg(test)]
mod view_smoke;
