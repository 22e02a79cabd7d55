use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::ids::{FragmentId, OptionId, QuestionId, StatementId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("choice question must carry at least one option")]
    NoOptions,

    #[error("boolean grid must carry at least one statement")]
    NoStatements,
}

//
// ─── QUESTION PARTS ────────────────────────────────────────────────────────────
//

/// One selectable option of a single- or multi-choice question.
///
/// `order` is the display marker ("a", "b", ...); options render in the
/// sequence the wire delivers them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub id: OptionId,
    pub order: String,
    pub label: String,
}

impl ChoiceOption {
    #[must_use]
    pub fn new(id: OptionId, order: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id,
            order: order.into(),
            label: label.into(),
        }
    }
}

/// One row of a boolean grid question, judged true or false on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub id: StatementId,
    pub text: String,
}

impl Statement {
    #[must_use]
    pub fn new(id: StatementId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// One pickable text fragment of a fragment-fill question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub id: FragmentId,
    pub text: String,
}

impl Fragment {
    #[must_use]
    pub fn new(id: FragmentId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

//
// ─── QUESTION KINDS ────────────────────────────────────────────────────────────
//

/// Per-type payload of a question.
///
/// Each variant carries its display data plus the optional correct reference.
/// The reference is absent while the exam is live; the grading endpoint only
/// includes it once the attempt is under review.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    /// Exactly one option may be selected.
    SingleChoice {
        options: Vec<ChoiceOption>,
        correct: Option<OptionId>,
    },
    /// Any subset of options may be selected.
    MultiChoice {
        options: Vec<ChoiceOption>,
        correct: Option<Vec<OptionId>>,
    },
    /// A single free-text line.
    FreeText { correct: Option<String> },
    /// Ordered blanks filled by picking fragments, each usable once.
    FragmentFill {
        fragments: Vec<Fragment>,
        slots: u32,
        correct: Option<Vec<String>>,
    },
    /// A fixed number of independent text fields, compared per position.
    FieldFill {
        fields: u32,
        correct: Option<Vec<String>>,
    },
    /// The answer is the URL of an uploaded file.
    FileUpload { correct_url: Option<String> },
    /// Per-statement true/false grid.
    BooleanGrid {
        statements: Vec<Statement>,
        correct: Option<BTreeMap<StatementId, bool>>,
    },
    /// Free-form source code; never graded automatically.
    CodeEditor { language: String },
    /// Unrecognized wire tag, kept so the page can render a placeholder
    /// instead of failing the whole load.
    Unknown { raw: String },
}

impl QuestionKind {
    /// The tag string this kind travels under on the wire.
    #[must_use]
    pub fn wire_tag(&self) -> &str {
        match self {
            QuestionKind::SingleChoice { .. } => "radio",
            QuestionKind::MultiChoice { .. } => "checkbox",
            QuestionKind::FreeText { .. } => "short",
            QuestionKind::FragmentFill { .. } => "clickchip",
            QuestionKind::FieldFill { .. } => "codeshort",
            QuestionKind::FileUpload { .. } => "file",
            QuestionKind::BooleanGrid { .. } => "truefalse",
            QuestionKind::CodeEditor { .. } => "codeeditor",
            QuestionKind::Unknown { raw } => raw,
        }
    }

    /// Whether this kind accepts answers at all.
    #[must_use]
    pub fn is_answerable(&self) -> bool {
        !matches!(self, QuestionKind::Unknown { .. })
    }

    /// Whether a correct reference is present for review overlays.
    #[must_use]
    pub fn has_reference(&self) -> bool {
        match self {
            QuestionKind::SingleChoice { correct, .. } => correct.is_some(),
            QuestionKind::MultiChoice { correct, .. } => correct.is_some(),
            QuestionKind::FreeText { correct } => correct.is_some(),
            QuestionKind::FragmentFill { correct, .. } => correct.is_some(),
            QuestionKind::FieldFill { correct, .. } => correct.is_some(),
            QuestionKind::FileUpload { correct_url } => correct_url.is_some(),
            QuestionKind::BooleanGrid { correct, .. } => correct.is_some(),
            QuestionKind::CodeEditor { .. } | QuestionKind::Unknown { .. } => false,
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One exam question, immutable once the set is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    kind: QuestionKind,
}

impl Question {
    /// Creates a new question.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty prompt, a choice kind without options,
    /// or a boolean grid without statements. `Unknown` kinds skip the payload
    /// checks so a bad record still renders its fallback.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        kind: QuestionKind,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() && kind.is_answerable() {
            return Err(QuestionError::EmptyPrompt);
        }

        match &kind {
            QuestionKind::SingleChoice { options, .. }
            | QuestionKind::MultiChoice { options, .. }
                if options.is_empty() =>
            {
                return Err(QuestionError::NoOptions);
            }
            QuestionKind::BooleanGrid { statements, .. } if statements.is_empty() => {
                return Err(QuestionError::NoStatements);
            }
            _ => {}
        }

        Ok(Self { id, prompt, kind })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
