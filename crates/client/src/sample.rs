use async_trait::async_trait;
use chrono::{Duration, Utc};
use exam_core::model::{
    AnswerSheet, AttemptReport, ChoiceOption, Fragment, FragmentId, OptionId, ProblemSetId,
    Question, QuestionError, QuestionId, QuestionKind, Statement, StatementId,
};
use std::collections::BTreeMap;

use crate::collaborators::{
    ApiError, CatalogSource, GradingSink, QuestionSource, ScoreboardSource, SectionOverview,
    SectionResult, Standing, SubmitReceipt,
};

/// The problem set served by the embedded backend.
#[must_use]
pub fn sample_problem_set() -> ProblemSetId {
    ProblemSetId::new(1)
}

/// Offline backend with one built-in problem set covering every question
/// kind. Submissions are graded locally against the built-in references.
#[derive(Clone, Default)]
pub struct SampleBackend;

impl SampleBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn build_questions() -> Result<Vec<Question>, QuestionError> {
    let radio = Question::new(
        QuestionId::new(1),
        "Which keyword introduces an immutable binding in Rust?",
        QuestionKind::SingleChoice {
            options: vec![
                ChoiceOption::new(OptionId::new(1), "a", "var"),
                ChoiceOption::new(OptionId::new(2), "b", "let"),
                ChoiceOption::new(OptionId::new(3), "c", "mut"),
                ChoiceOption::new(OptionId::new(4), "d", "static mut"),
            ],
            correct: Some(OptionId::new(2)),
        },
    )?;

    let checkbox = Question::new(
        QuestionId::new(2),
        "Select every primitive integer type.",
        QuestionKind::MultiChoice {
            options: vec![
                ChoiceOption::new(OptionId::new(1), "a", "i32"),
                ChoiceOption::new(OptionId::new(2), "b", "f64"),
                ChoiceOption::new(OptionId::new(3), "c", "u8"),
                ChoiceOption::new(OptionId::new(4), "d", "bool"),
            ],
            correct: Some(vec![OptionId::new(1), OptionId::new(3)]),
        },
    )?;

    let short = Question::new(
        QuestionId::new(3),
        "Name the tool that builds, tests and runs Rust projects.",
        QuestionKind::FreeText {
            correct: Some("cargo".into()),
        },
    )?;

    let clickchip = Question::new(
        QuestionId::new(4),
        "Pick fragments to complete the declarations: ___ price = 5000; let ___ total = 0;",
        QuestionKind::FragmentFill {
            fragments: vec![
                Fragment::new(FragmentId::new(1), "let"),
                Fragment::new(FragmentId::new(2), "mut"),
                Fragment::new(FragmentId::new(3), "const"),
            ],
            slots: 2,
            correct: Some(vec!["let".into(), "mut".into()]),
        },
    )?;

    let codeshort = Question::new(
        QuestionId::new(5),
        "Fill both blanks: let apples: ___ = ___; so the total fits thousands.",
        QuestionKind::FieldFill {
            fields: 2,
            correct: Some(vec!["u32".into(), "2000".into()]),
        },
    )?;

    let file = Question::new(
        QuestionId::new(6),
        "Upload your solution file for the sorting exercise.",
        QuestionKind::FileUpload {
            correct_url: Some("https://files.quzuu.example/solutions/sorting.rs".into()),
        },
    )?;

    let truefalse = Question::new(
        QuestionId::new(7),
        "Mark each statement true or false.",
        QuestionKind::BooleanGrid {
            statements: vec![
                Statement::new(StatementId::new(1), "A u8 can store the value 300."),
                Statement::new(StatementId::new(2), "Shadowing rebinds an existing name."),
                Statement::new(StatementId::new(3), "&str grows when pushed to."),
            ],
            correct: Some(BTreeMap::from([
                (StatementId::new(1), false),
                (StatementId::new(2), true),
                (StatementId::new(3), false),
            ])),
        },
    )?;

    let codeeditor = Question::new(
        QuestionId::new(8),
        "Implement fizzbuzz(n: u32) -> String with the usual rules.",
        QuestionKind::CodeEditor {
            language: "rust".into(),
        },
    )?;

    Ok(vec![
        radio, checkbox, short, clickchip, codeshort, file, truefalse, codeeditor,
    ])
}

fn build_error(e: QuestionError) -> ApiError {
    ApiError::Decode(e.to_string())
}

#[async_trait]
impl QuestionSource for SampleBackend {
    async fn fetch_questions(
        &self,
        problem_set: ProblemSetId,
    ) -> Result<Vec<Question>, ApiError> {
        if problem_set != sample_problem_set() {
            return Err(ApiError::NotFound);
        }
        build_questions().map_err(build_error)
    }
}

#[async_trait]
impl GradingSink for SampleBackend {
    async fn submit_answers(
        &self,
        problem_set: ProblemSetId,
        sheet: &AnswerSheet,
    ) -> Result<SubmitReceipt, ApiError> {
        if problem_set != sample_problem_set() {
            return Err(ApiError::NotFound);
        }
        let questions = build_questions().map_err(build_error)?;
        let report = AttemptReport::tally(&questions, sheet);
        let score = if report.total() == 0 {
            0.0
        } else {
            report.correct as f64 * 100.0 / report.total() as f64
        };
        Ok(SubmitReceipt {
            message: "answers received".into(),
            score: Some(score),
        })
    }
}

#[async_trait]
impl CatalogSource for SampleBackend {
    async fn list_sections(&self) -> Result<Vec<SectionOverview>, ApiError> {
        let finished_at = Utc::now();
        let started_at = finished_at - Duration::minutes(78);
        Ok(vec![
            SectionOverview {
                id: sample_problem_set(),
                title: "Programming Basics".into(),
                slug: "programming-basics".into(),
                description: "Bindings, integer types and a little code reading.".into(),
                result: None,
            },
            SectionOverview {
                id: ProblemSetId::new(2),
                title: "Analytics Warmup".into(),
                slug: "analytics-warmup".into(),
                description: "Pattern and sequence reasoning.".into(),
                result: Some(SectionResult {
                    score: 85.0,
                    report: AttemptReport {
                        correct: 17,
                        wrong: 2,
                        blank: 1,
                        pending: 0,
                    },
                    started_at,
                    finished_at,
                }),
            },
        ])
    }
}

#[async_trait]
impl ScoreboardSource for SampleBackend {
    async fn standings(&self, problem_set: ProblemSetId) -> Result<Vec<Standing>, ApiError> {
        if problem_set != sample_problem_set() && problem_set != ProblemSetId::new(2) {
            return Err(ApiError::NotFound);
        }
        Ok(vec![
            Standing {
                rank: 1,
                username: "ayu".into(),
                score: 95.0,
                duration_mins: 53.417,
            },
            Standing {
                rank: 2,
                username: "bima".into(),
                score: 90.0,
                duration_mins: 61.25,
            },
            Standing {
                rank: 3,
                username: "citra".into(),
                score: 85.0,
                duration_mins: 58.004,
            },
            Standing {
                rank: 4,
                username: "dimas".into(),
                score: 70.0,
                duration_mins: 74.9,
            },
        ])
    }
}
