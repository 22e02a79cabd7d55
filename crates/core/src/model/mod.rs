mod answer;
mod countdown;
mod exam_settings;
mod grading;
mod ids;
mod question;

pub use ids::{FragmentId, OptionId, ParseIdError, ProblemSetId, QuestionId, StatementId};

pub use answer::{toggle_option, AnswerError, AnswerSheet, AnswerValue, FragmentDraft};
pub use countdown::{Countdown, ExpiryPolicy, ParseExpiryPolicyError};
pub use exam_settings::{ExamSettings, ExamSettingsError};
pub use grading::{judge, AttemptReport, Verdict};
pub use question::{
    ChoiceOption, Fragment, Question, QuestionError, QuestionKind, Statement,
};
