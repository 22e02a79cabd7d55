use std::sync::Arc;

use async_trait::async_trait;
use client::{ApiError, GradingSink, InMemoryBackend, SubmitReceipt};
use exam_core::model::{
    AnswerSheet, AnswerValue, ExamSettings, ProblemSetId, Question, QuestionId, QuestionKind,
};
use tokio::sync::Notify;

use crate::views::test_harness::{
    ViewKind, drive_dom, setup_view_harness, setup_view_harness_with_grading,
};
use crate::vm::QuizIntent;

fn free_text(id: u64, correct: &str) -> Question {
    Question::new(
        QuestionId::new(id),
        format!("question {id}"),
        QuestionKind::FreeText {
            correct: Some(correct.to_string()),
        },
    )
    .expect("valid question")
}

fn quiz_backend() -> InMemoryBackend {
    let backend = InMemoryBackend::new();
    backend.put_questions(
        ProblemSetId::new(1),
        vec![free_text(1, "42"), free_text(2, "blue")],
    );
    backend
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_intents_smoke_answer_then_submit_enters_review() {
    let backend = quiz_backend();
    backend.set_submit_score(Some(50.0));

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

    let handles = harness.quiz_handles.clone().expect("quiz handles");
    let dispatch = handles.dispatch();
    let vm = handles.vm();

    dispatch.call(QuizIntent::Answer(
        QuestionId::new(1),
        AnswerValue::Text("42".into()),
    ));
    drive_dom(&mut harness.dom);

    {
        let guard = vm.read();
        let vm_value = guard.as_ref().expect("attempt loaded");
        assert_eq!(vm_value.progress().answered, 1);
        assert!(!vm_value.is_reviewed());
    }

    dispatch.call(QuizIntent::Submit);
    drive_dom(&mut harness.dom);
    harness.drive_async().await;
    drive_dom(&mut harness.dom);

    {
        let guard = vm.read();
        let vm_value = guard.as_ref().expect("attempt still present");
        assert!(vm_value.is_reviewed());
        assert_eq!(vm_value.score(), Some(50.0));
    }

    let submissions = harness.backend.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(
        submissions[0].1.get(QuestionId::new(1)),
        Some(&AnswerValue::Text("42".into()))
    );

    // Review mode is one way; later edits and submits are ignored.
    dispatch.call(QuizIntent::Answer(
        QuestionId::new(1),
        AnswerValue::Text("changed my mind".into()),
    ));
    dispatch.call(QuizIntent::Submit);
    drive_dom(&mut harness.dom);
    harness.drive_async().await;

    {
        let guard = vm.read();
        let vm_value = guard.as_ref().expect("attempt still present");
        assert_eq!(
            vm_value.answer_for(QuestionId::new(1)),
            Some(AnswerValue::Text("42".into()))
        );
    }
    assert_eq!(harness.backend.submissions().len(), 1);
}

/// Holds every submission until the test releases the gate, so assertions can
/// run while the grading call is still in flight.
struct GatedGrading {
    inner: InMemoryBackend,
    gate: Arc<Notify>,
}

#[async_trait]
impl GradingSink for GatedGrading {
    async fn submit_answers(
        &self,
        problem_set: ProblemSetId,
        sheet: &AnswerSheet,
    ) -> Result<SubmitReceipt, ApiError> {
        self.gate.notified().await;
        self.inner.submit_answers(problem_set, sheet).await
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_stays_interactive_while_a_submission_is_in_flight() {
    let backend = quiz_backend();
    backend.set_submit_score(Some(80.0));
    let gate = Arc::new(Notify::new());
    let grading = Arc::new(GatedGrading {
        inner: backend.clone(),
        gate: Arc::clone(&gate),
    });

    let mut harness = setup_view_harness_with_grading(
        ViewKind::Quiz {
            problem_set: 1,
            num: 1,
        },
        backend,
        ExamSettings::standard(),
        grading,
    );
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let handles = harness.quiz_handles.clone().expect("quiz handles");
    let dispatch = handles.dispatch();
    let vm = handles.vm();

    dispatch.call(QuizIntent::Answer(
        QuestionId::new(1),
        AnswerValue::Text("42".into()),
    ));
    dispatch.call(QuizIntent::Submit);
    drive_dom(&mut harness.dom);
    harness.drive_async().await;

    // The grading call is parked on the gate. The attempt must still render
    // and the sheet must still accept writes.
    let html = harness.render();
    assert!(
        html.contains("question 1"),
        "question hidden during an in-flight submit: {html}"
    );
    dispatch.call(QuizIntent::Answer(
        QuestionId::new(2),
        AnswerValue::Text("blue".into()),
    ));
    drive_dom(&mut harness.dom);

    {
        let guard = vm.read();
        let vm_value = guard.as_ref().expect("attempt present during submit");
        assert!(!vm_value.is_reviewed());
        assert_eq!(
            vm_value.answer_for(QuestionId::new(2)),
            Some(AnswerValue::Text("blue".into())),
            "answer recorded during an in-flight submit was lost"
        );
    }

    gate.notify_one();
    harness.drive_async().await;
    drive_dom(&mut harness.dom);

    {
        let guard = vm.read();
        let vm_value = guard.as_ref().expect("attempt present after submit");
        assert!(vm_value.is_reviewed());
        assert_eq!(vm_value.score(), Some(80.0));
        // The late answer stays on the sheet even though it missed the
        // graded snapshot.
        assert_eq!(
            vm_value.answer_for(QuestionId::new(2)),
            Some(AnswerValue::Text("blue".into()))
        );
    }

    let submissions = harness.backend.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(
        submissions[0].1.get(QuestionId::new(1)),
        Some(&AnswerValue::Text("42".into()))
    );
    assert!(submissions[0].1.get(QuestionId::new(2)).is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_submit_failure_keeps_the_attempt_editable() {
    let backend = quiz_backend();
    backend.set_fail_submits(true);

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

    let handles = harness.quiz_handles.clone().expect("quiz handles");
    let dispatch = handles.dispatch();
    let vm = handles.vm();

    dispatch.call(QuizIntent::Answer(
        QuestionId::new(2),
        AnswerValue::Text("blue".into()),
    ));
    dispatch.call(QuizIntent::Submit);
    drive_dom(&mut harness.dom);
    harness.drive_async().await;
    drive_dom(&mut harness.dom);

    {
        let guard = vm.read();
        let vm_value = guard.as_ref().expect("attempt still present");
        assert!(!vm_value.is_reviewed(), "failed submit must not lock the attempt");
        assert_eq!(vm_value.progress().answered, 1);
    }
    assert!(harness.backend.submissions().is_empty());

    // The same attempt can be resubmitted once the backend recovers.
    harness.backend.set_fail_submits(false);
    dispatch.call(QuizIntent::Submit);
    drive_dom(&mut harness.dom);
    harness.drive_async().await;
    drive_dom(&mut harness.dom);

    {
        let guard = vm.read();
        let vm_value = guard.as_ref().expect("attempt still present");
        assert!(vm_value.is_reviewed());
    }
    assert_eq!(harness.backend.submissions().len(), 1);
}
