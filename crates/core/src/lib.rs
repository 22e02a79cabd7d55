#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod time;

pub use error::Error;
pub use time::{fixed_clock, fixed_now, Clock, FIXED_TEST_TIMESTAMP};

pub use model::{
    judge, toggle_option, AnswerError, AnswerSheet, AnswerValue, AttemptReport, ChoiceOption,
    Countdown, ExamSettings, ExamSettingsError, ExpiryPolicy, Fragment, FragmentDraft,
    FragmentId, OptionId, ParseExpiryPolicyError, ParseIdError, ProblemSetId, Question,
    QuestionError, QuestionId, QuestionKind, Statement, StatementId, Verdict,
};
