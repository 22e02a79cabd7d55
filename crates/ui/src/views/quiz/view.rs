use dioxus::prelude::*;
use dioxus_router::use_navigator;

use exam_core::model::{
    AnswerValue, Countdown, ExpiryPolicy, ProblemSetId, Question, QuestionKind,
};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ExamVm, QuizIntent, nav_target, start_attempt};

use super::components::{
    BooleanGridAnswer, CodeEditorAnswer, FieldFillAnswer, FileUploadAnswer, FragmentFillAnswer,
    FreeTextAnswer, MultiChoiceAnswer, SingleChoiceAnswer, UnsupportedAnswer,
};
use super::navigator::QuizNavigator;
use super::state::{Notice, SubmitState};

#[cfg(test)]
use super::state::QuizTestHandles;

/// The quiz session controller: owns the attempt, the submit lifecycle, and
/// the countdown; resolves the current question from the `?num` route
/// parameter and delegates rendering to the per-kind answer widgets.
#[component]
pub fn QuizView(problem_set_id: u64, num: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let flow = ctx.exam_flow();
    let settings = ctx.exam_settings();
    let problem_set = ProblemSetId::new(problem_set_id);
    // `?num` absent (0 via Default) means question 1.
    let current_number = if num == 0 { 1 } else { num };

    let vm = use_signal(|| None::<ExamVm>);
    let submit_state = use_signal(SubmitState::default);
    let notice = use_signal(|| None::<Notice>);
    let countdown = use_signal(|| Countdown::new(settings.duration_secs()));

    let flow_for_resource = flow.clone();
    let resource = use_resource(move || {
        let flow = flow_for_resource.clone();
        let mut vm = vm;
        async move {
            let started = start_attempt(&flow, problem_set).await?;
            vm.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let dispatch_intent = {
        let flow = flow.clone();
        use_callback(move |intent: QuizIntent| {
            let mut vm = vm;
            let mut submit_state = submit_state;
            let mut notice = notice;

            match intent {
                QuizIntent::Answer(question_id, value) => {
                    // A write after review is a no-op inside the attempt.
                    if let Some(vm) = vm.write().as_mut() {
                        vm.record(question_id, value);
                    }
                }
                QuizIntent::Submit => {
                    if *submit_state.peek() == SubmitState::Submitting {
                        return;
                    }
                    // Grade a snapshot of the sheet; the attempt stays in the
                    // signal the whole time so the view keeps rendering and
                    // answers still land while the call is in flight.
                    let Some(payload) = vm.peek().as_ref().and_then(|vm| {
                        (!vm.is_reviewed()).then(|| vm.submit_payload())
                    }) else {
                        return;
                    };
                    submit_state.set(SubmitState::Submitting);
                    let flow = flow.clone();
                    spawn(async move {
                        let (problem_set, sheet) = payload;
                        let result = flow.submit_sheet(problem_set, &sheet).await;
                        submit_state.set(SubmitState::Idle);

                        match result {
                            Ok(outcome) => {
                                if let Some(vm) = vm.write().as_mut() {
                                    vm.finish(&flow, outcome.score);
                                }
                                notice.set(Some(Notice::Success(outcome.message)));
                            }
                            Err(_) => {
                                notice.set(Some(Notice::Error(
                                    "Submission failed. Your answers are kept; try again.".into(),
                                )));
                            }
                        }
                    });
                }
            }
        })
    };

    // One tick per second; the countdown floors at zero. What happens at
    // zero is the configured expiry policy.
    let expiry_policy = settings.on_expire();
    use_future(move || async move {
        let mut countdown = countdown;
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
        interval.tick().await;
        loop {
            interval.tick().await;
            let expired = {
                let mut value = countdown.write();
                value.tick();
                value.is_expired()
            };
            if expired {
                if expiry_policy == ExpiryPolicy::AutoSubmit {
                    dispatch_intent.call(QuizIntent::Submit);
                }
                break;
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let vm_guard = vm.read();
    let reviewing = vm_guard.as_ref().is_some_and(ExamVm::is_reviewed);
    let submitting = *submit_state.read() == SubmitState::Submitting;
    let total = vm_guard.as_ref().map_or(0, ExamVm::total_questions);
    let question_numbers: Vec<u64> = vm_guard
        .as_ref()
        .map(|vm| vm.questions().iter().map(|q| q.id().value()).collect())
        .unwrap_or_default();
    let answered = vm_guard
        .as_ref()
        .map(ExamVm::answered_numbers)
        .unwrap_or_default();
    let current_question = vm_guard
        .as_ref()
        .and_then(|vm| vm.question_by_number(current_number))
        .cloned();
    let current_value = current_question.as_ref().and_then(|question| {
        vm_guard
            .as_ref()
            .and_then(|vm| vm.answer_for(question.id()))
    });
    let report = reviewing.then(|| vm_guard.as_ref().map(ExamVm::report)).flatten();
    let score = vm_guard.as_ref().and_then(ExamVm::score);
    let remaining_secs = countdown.read().remaining_secs();
    let notice_value = notice.read().clone();
    drop(vm_guard);

    let prev_target = nav_target(current_number, total, -1);
    let next_target = nav_target(current_number, total, 1);

    rsx! {
        div { class: "page quiz-page",
            div { class: "quiz-main",
                if let Some(notice) = notice_value {
                    p { class: notice.css_class(), "{notice.text()}" }
                }
                if let Some(report) = report {
                    div { class: "review-banner",
                        h3 { "Review mode" }
                        if let Some(score) = score {
                            p { class: "review-banner__score", "Score: {score:.1}" }
                        }
                        ul {
                            li { "Correct: {report.correct}" }
                            li { "Wrong: {report.wrong}" }
                            li { "Empty: {report.blank}" }
                            li { "Being graded: {report.pending}" }
                        }
                    }
                }
                match state {
                    ViewState::Idle => rsx! { p { "Idle" } },
                    ViewState::Loading => rsx! { p { "Loading questions..." } },
                    ViewState::Error(err) => rsx! {
                        p { class: "error", "{err.message()}" }
                    },
                    ViewState::Ready(()) => rsx! {
                        if let Some(question) = current_question {
                            div { class: "quiz-question",
                                h3 { class: "quiz-question__number", "Question {question.id()}" }
                                p { class: "quiz-question__prompt", "{question.prompt()}" }
                                AnswerPanel {
                                    question: question.clone(),
                                    value: current_value,
                                    review: reviewing,
                                    on_change: move |value| {
                                        dispatch_intent
                                            .call(QuizIntent::Answer(question.id(), value));
                                    },
                                }
                            }
                        } else {
                            p { class: "quiz-placeholder",
                                "There is no question at this number."
                            }
                        }
                        div { class: "quiz-pager",
                            button {
                                class: "btn btn-secondary",
                                disabled: prev_target.is_none(),
                                onclick: move |_| {
                                    if let Some(target) = prev_target {
                                        navigator.push(Route::Quiz {
                                            problem_set_id,
                                            num: target,
                                        });
                                    }
                                },
                                "Previous"
                            }
                            button {
                                class: "btn btn-secondary",
                                disabled: next_target.is_none(),
                                onclick: move |_| {
                                    if let Some(target) = next_target {
                                        navigator.push(Route::Quiz {
                                            problem_set_id,
                                            num: target,
                                        });
                                    }
                                },
                                "Next"
                            }
                        }
                    },
                }
            }
            QuizNavigator {
                problem_set_id,
                current: current_number,
                question_numbers,
                answered,
                remaining_secs,
                reviewing,
                submitting,
                on_submit: move |()| dispatch_intent.call(QuizIntent::Submit),
            }
        }
    }
}

/// Picks the widget for the question kind and feeds it the current value
/// plus the correct reference for review overlays. Unrecognized kinds render
/// the fallback instead of failing the page.
#[component]
fn AnswerPanel(
    question: Question,
    value: Option<AnswerValue>,
    review: bool,
    on_change: EventHandler<AnswerValue>,
) -> Element {
    match question.kind() {
        QuestionKind::SingleChoice { options, correct } => rsx! {
            SingleChoiceAnswer {
                options: options.clone(),
                correct: *correct,
                selected: match &value {
                    Some(AnswerValue::Choice(id)) => Some(*id),
                    _ => None,
                },
                review,
                on_change: move |v| on_change.call(v),
            }
        },
        QuestionKind::MultiChoice { options, correct } => rsx! {
            MultiChoiceAnswer {
                options: options.clone(),
                correct: correct.clone(),
                selected: match &value {
                    Some(AnswerValue::Choices(ids)) => ids.clone(),
                    _ => Vec::new(),
                },
                review,
                on_change: move |v| on_change.call(v),
            }
        },
        QuestionKind::FreeText { correct } => rsx! {
            FreeTextAnswer {
                correct: correct.clone(),
                value: match &value {
                    Some(AnswerValue::Text(text)) => text.clone(),
                    _ => String::new(),
                },
                review,
                on_change: move |v| on_change.call(v),
            }
        },
        QuestionKind::FragmentFill {
            fragments,
            slots,
            correct,
        } => rsx! {
            FragmentFillAnswer {
                fragments: fragments.clone(),
                slots: *slots,
                correct: correct.clone(),
                filled: match &value {
                    Some(AnswerValue::Fragments(items)) => items.clone(),
                    _ => Vec::new(),
                },
                review,
                on_change: move |v| on_change.call(v),
            }
        },
        QuestionKind::FieldFill { fields, correct } => rsx! {
            FieldFillAnswer {
                fields: *fields,
                correct: correct.clone(),
                values: match &value {
                    Some(AnswerValue::Fields(items)) => items.clone(),
                    _ => Vec::new(),
                },
                review,
                on_change: move |v| on_change.call(v),
            }
        },
        QuestionKind::FileUpload { correct_url } => rsx! {
            FileUploadAnswer {
                correct_url: correct_url.clone(),
                value: match &value {
                    Some(AnswerValue::FileUrl(url)) => url.clone(),
                    _ => String::new(),
                },
                review,
                on_change: move |v| on_change.call(v),
            }
        },
        QuestionKind::BooleanGrid {
            statements,
            correct,
        } => rsx! {
            BooleanGridAnswer {
                statements: statements.clone(),
                correct: correct.clone(),
                marks: match &value {
                    Some(AnswerValue::Booleans(map)) => map.clone(),
                    _ => std::collections::BTreeMap::new(),
                },
                review,
                on_change: move |v| on_change.call(v),
            }
        },
        QuestionKind::CodeEditor { language } => rsx! {
            CodeEditorAnswer {
                language: language.clone(),
                value: match &value {
                    Some(AnswerValue::Code(code)) => code.clone(),
                    _ => String::new(),
                },
                review,
                on_change: move |v| on_change.call(v),
            }
        },
        QuestionKind::Unknown { raw } => rsx! {
            UnsupportedAnswer { raw: raw.clone() }
        },
    }
}
