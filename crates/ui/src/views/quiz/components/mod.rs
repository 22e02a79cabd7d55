mod boolean_grid;
mod code_editor;
mod field_fill;
mod file_upload;
mod fragment_fill;
mod free_text;
mod multi_choice;
mod single_choice;

pub use boolean_grid::BooleanGridAnswer;
pub use code_editor::CodeEditorAnswer;
pub use field_fill::FieldFillAnswer;
pub use file_upload::FileUploadAnswer;
pub use fragment_fill::FragmentFillAnswer;
pub use free_text::FreeTextAnswer;
pub use multi_choice::MultiChoiceAnswer;
pub use single_choice::SingleChoiceAnswer;

use dioxus::prelude::*;

/// Fallback for wire tags this client does not know how to render.
#[component]
pub fn UnsupportedAnswer(raw: String) -> Element {
    rsx! {
        div { class: "answer answer--unsupported",
            p { "Unrecognized question type \"{raw}\". This question cannot be answered here." }
        }
    }
}
