mod components;
mod navigator;
pub(crate) mod state;
mod view;

pub use view::QuizView;

#[cfg(test)]
mod intent_smoke;
