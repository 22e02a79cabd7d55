#![forbid(unsafe_code)]

pub mod collaborators;
pub mod http;
pub mod sample;

pub use collaborators::{
    ApiError, AuthSession, Backend, CatalogSource, GradingSink, InMemoryBackend,
    QuestionSource, ScoreboardSource, SectionOverview, SectionResult, Standing, SubmitReceipt,
};
pub use http::{ApiConfig, HttpBackend};
pub use sample::{sample_problem_set, SampleBackend};
