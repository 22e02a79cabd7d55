use chrono::{DateTime, Utc};
use exam_core::model::{
    AnswerSheet, AnswerValue, AttemptReport, ChoiceOption, Fragment, FragmentId, OptionId,
    ProblemSetId, Question, QuestionId, QuestionKind, Statement, StatementId,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use crate::collaborators::{ApiError, SectionOverview, SectionResult, Standing, SubmitReceipt};

fn decode<E: core::fmt::Display>(e: E) -> ApiError {
    ApiError::Decode(e.to_string())
}

//
// ─── RESPONSE ENVELOPE ─────────────────────────────────────────────────────────
//

/// Standard response wrapper: `{ "message": ..., "success": ..., "data": ... }`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub message: String,
    pub success: bool,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwraps the payload, turning a `success: false` body into a rejection.
    pub(crate) fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(self.message));
        }
        self.data
            .ok_or_else(|| ApiError::Decode("response envelope missing data".into()))
    }
}

/// Submission responses carry the score beside the message instead of a
/// `data` payload.
#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponseDto {
    #[serde(default)]
    pub message: String,
    pub success: bool,
    pub score: Option<f64>,
}

impl SubmitResponseDto {
    pub(crate) fn into_receipt(self) -> Result<SubmitReceipt, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(self.message));
        }
        Ok(SubmitReceipt {
            message: self.message,
            score: self.score,
        })
    }
}

//
// ─── QUESTION DTOS ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct OptionDto {
    pub id: u64,
    #[serde(default)]
    pub order: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementDto {
    pub id: u64,
    #[serde(default)]
    pub statement: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FragmentDto {
    pub id: u64,
    #[serde(default)]
    pub content: String,
}

/// One question as delivered by `GET /questions/{problemset}`.
///
/// `correctAnswer` is polymorphic on the wire: a number for radio, an array
/// of numbers for checkbox, an array of strings for clickchip/codeshort and
/// an object for truefalse. It stays a raw `Value` here and is shaped per
/// kind during mapping.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionDto {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<OptionDto>,
    #[serde(default)]
    pub statements: Vec<StatementDto>,
    #[serde(default)]
    pub fragments: Vec<FragmentDto>,
    #[serde(default)]
    pub slots: Option<u32>,
    #[serde(default)]
    pub fields: Option<u32>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub correct_answer: Option<Value>,
    #[serde(default)]
    pub correct_answer_text: Option<String>,
    #[serde(default)]
    pub correct_file_url: Option<String>,
}

fn option_id_from_value(value: &Value) -> Option<OptionId> {
    value.as_u64().map(OptionId::new)
}

fn option_ids_from_value(value: &Value) -> Option<Vec<OptionId>> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(option_id_from_value).collect())
}

fn strings_from_value(value: &Value) -> Option<Vec<String>> {
    value.as_array().map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect()
    })
}

fn bool_map_from_value(value: &Value) -> Option<BTreeMap<StatementId, bool>> {
    let object = value.as_object()?;
    let mut map = BTreeMap::new();
    for (key, val) in object {
        let id: u64 = key.parse().ok()?;
        map.insert(StatementId::new(id), val.as_bool()?);
    }
    Some(map)
}

/// Maps a wire question into the domain, decoding unrecognized type tags to
/// `QuestionKind::Unknown` so one bad record cannot fail the whole load.
pub(crate) fn question_from_dto(dto: QuestionDto) -> Result<Question, ApiError> {
    let options: Vec<ChoiceOption> = dto
        .options
        .iter()
        .map(|o| ChoiceOption::new(OptionId::new(o.id), o.order.clone(), o.label.clone()))
        .collect();
    let statements: Vec<Statement> = dto
        .statements
        .iter()
        .map(|s| Statement::new(StatementId::new(s.id), s.statement.clone()))
        .collect();
    let fragments: Vec<Fragment> = dto
        .fragments
        .iter()
        .map(|f| Fragment::new(FragmentId::new(f.id), f.content.clone()))
        .collect();

    let kind = match dto.kind.as_str() {
        "radio" => QuestionKind::SingleChoice {
            options,
            correct: dto.correct_answer.as_ref().and_then(option_id_from_value),
        },
        "checkbox" => QuestionKind::MultiChoice {
            options,
            correct: dto.correct_answer.as_ref().and_then(option_ids_from_value),
        },
        "short" => QuestionKind::FreeText {
            correct: dto.correct_answer_text.clone(),
        },
        "clickchip" => {
            let correct = dto.correct_answer.as_ref().and_then(strings_from_value);
            let slots = dto
                .slots
                .or_else(|| correct.as_ref().map(|c| c.len() as u32))
                .unwrap_or(fragments.len() as u32);
            QuestionKind::FragmentFill {
                fragments,
                slots,
                correct,
            }
        }
        "codeshort" => {
            let correct = dto.correct_answer.as_ref().and_then(strings_from_value);
            let fields = dto
                .fields
                .or_else(|| correct.as_ref().map(|c| c.len() as u32))
                .unwrap_or(1);
            QuestionKind::FieldFill { fields, correct }
        }
        "file" => QuestionKind::FileUpload {
            correct_url: dto.correct_file_url.clone(),
        },
        "truefalse" => QuestionKind::BooleanGrid {
            statements,
            correct: dto.correct_answer.as_ref().and_then(bool_map_from_value),
        },
        "codeeditor" => QuestionKind::CodeEditor {
            language: dto.language.clone().unwrap_or_else(|| "plain".into()),
        },
        other => QuestionKind::Unknown {
            raw: other.to_string(),
        },
    };

    Question::new(QuestionId::new(dto.id), dto.question, kind).map_err(decode)
}

//
// ─── ANSWER PAYLOAD ────────────────────────────────────────────────────────────
//

/// Serializes the sheet into the submit body:
/// `{ "answers": { "<question id>": <value> } }`.
pub(crate) fn sheet_payload(sheet: &AnswerSheet) -> Value {
    let mut answers = Map::new();
    for (id, value) in sheet.iter() {
        answers.insert(id.to_string(), answer_value_json(value));
    }
    json!({ "answers": answers })
}

fn answer_value_json(value: &AnswerValue) -> Value {
    match value {
        AnswerValue::Choice(id) => json!(id.value()),
        AnswerValue::Choices(ids) => {
            json!(ids.iter().map(OptionId::value).collect::<Vec<u64>>())
        }
        AnswerValue::Text(s) | AnswerValue::Code(s) | AnswerValue::FileUrl(s) => json!(s),
        AnswerValue::Fragments(items) | AnswerValue::Fields(items) => json!(items),
        AnswerValue::Booleans(map) => {
            let mut object = Map::new();
            for (id, val) in map {
                object.insert(id.to_string(), json!(val));
            }
            Value::Object(object)
        }
    }
}

//
// ─── CATALOG AND SCOREBOARD DTOS ───────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SectionDto {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub correct_count: usize,
    #[serde(default)]
    pub wrong_count: usize,
    #[serde(default)]
    pub empty_count: usize,
    #[serde(default)]
    pub review_count: usize,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

pub(crate) fn section_from_dto(dto: SectionDto) -> SectionOverview {
    let result = match (dto.is_completed, dto.start_time, dto.end_time) {
        (true, Some(started_at), Some(finished_at)) => Some(SectionResult {
            score: dto.score,
            report: AttemptReport {
                correct: dto.correct_count,
                wrong: dto.wrong_count,
                blank: dto.empty_count,
                pending: dto.review_count,
            },
            started_at,
            finished_at,
        }),
        _ => None,
    };

    SectionOverview {
        id: ProblemSetId::new(dto.id),
        title: dto.title,
        slug: dto.slug,
        description: dto.description,
        result,
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StandingDto {
    pub rank: u32,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub duration: f64,
}

pub(crate) fn standing_from_dto(dto: StandingDto) -> Standing {
    Standing {
        rank: dto.rank,
        username: dto.username,
        score: dto.score,
        duration_mins: dto.duration,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
