use client::{InMemoryBackend, SectionOverview, SectionResult, Standing};
use exam_core::fixed_now;
use exam_core::model::{
    AttemptReport, ChoiceOption, OptionId, ProblemSetId, Question, QuestionId, QuestionKind,
};

use super::test_harness::{ViewKind, setup_view_harness};

fn free_text(id: u64, prompt: &str) -> Question {
    Question::new(
        QuestionId::new(id),
        prompt,
        QuestionKind::FreeText { correct: None },
    )
    .expect("valid question")
}

fn single_choice(id: u64, prompt: &str) -> Question {
    Question::new(
        QuestionId::new(id),
        prompt,
        QuestionKind::SingleChoice {
            options: vec![
                ChoiceOption::new(OptionId::new(1), "A", "first"),
                ChoiceOption::new(OptionId::new(2), "B", "second"),
            ],
            correct: Some(OptionId::new(2)),
        },
    )
    .expect("valid question")
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_section_cards() {
    let backend = InMemoryBackend::new();
    backend.put_sections(vec![
        SectionOverview {
            id: ProblemSetId::new(1),
            title: "Number theory".into(),
            slug: "number-theory".into(),
            description: "Warm-up round".into(),
            result: None,
        },
        SectionOverview {
            id: ProblemSetId::new(2),
            title: "Graphs".into(),
            slug: "graphs".into(),
            description: String::new(),
            result: Some(SectionResult {
                score: 87.5,
                report: AttemptReport {
                    correct: 7,
                    wrong: 2,
                    blank: 1,
                    pending: 0,
                },
                started_at: fixed_now(),
                finished_at: fixed_now(),
            }),
        },
    ]);

    let mut harness = setup_view_harness(ViewKind::Home, backend);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Number theory"), "missing section in {html}");
    assert!(html.contains("Start"), "missing start link in {html}");
    assert!(html.contains("Score: 87.5"), "missing score in {html}");
    assert!(html.contains("Review"), "missing review link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_the_current_question() {
    let backend = InMemoryBackend::new();
    backend.put_questions(
        ProblemSetId::new(1),
        vec![
            single_choice(1, "Pick the second option."),
            free_text(2, "Name a prime."),
        ],
    );

    let mut harness = setup_view_harness(
        ViewKind::Quiz {
            problem_set: 1,
            num: 1,
        },
        backend,
    );
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Pick the second option."),
        "missing prompt in {html}"
    );
    assert!(html.contains("first"), "missing option label in {html}");
    assert!(html.contains("Submit"), "missing submit button in {html}");
    // The navigator lists both questions, zero padded.
    assert!(html.contains("02"), "missing navigator entry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_out_of_range_number_shows_a_placeholder() {
    let backend = InMemoryBackend::new();
    backend.put_questions(ProblemSetId::new(1), vec![free_text(1, "Name a prime.")]);

    let mut harness = setup_view_harness(
        ViewKind::Quiz {
            problem_set: 1,
            num: 9,
        },
        backend,
    );
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("There is no question at this number."),
        "missing placeholder in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_falls_back_on_unknown_question_kinds() {
    let backend = InMemoryBackend::new();
    let question = Question::new(
        QuestionId::new(1),
        "",
        QuestionKind::Unknown {
            raw: "hologram".into(),
        },
    )
    .expect("unknown kinds skip payload checks");
    backend.put_questions(ProblemSetId::new(1), vec![question]);

    let mut harness = setup_view_harness(
        ViewKind::Quiz {
            problem_set: 1,
            num: 1,
        },
        backend,
    );
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Unrecognized question type"),
        "missing fallback in {html}"
    );
    assert!(html.contains("hologram"), "missing raw tag in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_surfaces_an_empty_set_as_an_error() {
    let backend = InMemoryBackend::new();
    backend.put_questions(ProblemSetId::new(1), Vec::new());

    let mut harness = setup_view_harness(
        ViewKind::Quiz {
            problem_set: 1,
            num: 1,
        },
        backend,
    );
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("This problem set has no questions yet."),
        "missing empty-set error in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn scoreboard_view_smoke_renders_rows() {
    let backend = InMemoryBackend::new();
    backend.put_standings(
        ProblemSetId::new(1),
        vec![
            Standing {
                rank: 1,
                username: "ada".into(),
                score: 100.0,
                duration_mins: 42.125,
            },
            Standing {
                rank: 2,
                username: "charles".into(),
                score: 75.0,
                duration_mins: 58.5,
            },
        ],
    );

    let mut harness = setup_view_harness(ViewKind::Scoreboard(1), backend);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("ada"), "missing first row in {html}");
    assert!(html.contains("charles"), "missing second row in {html}");
    assert!(html.contains("42.125"), "missing duration in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn scoreboard_view_surfaces_a_missing_set_as_an_error() {
    let backend = InMemoryBackend::new();

    let mut harness = setup_view_harness(ViewKind::Scoreboard(7), backend);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Something went wrong"),
        "missing error state in {html}"
    );
}
