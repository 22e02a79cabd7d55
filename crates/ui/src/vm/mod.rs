mod exam_vm;
mod scoreboard_vm;
mod section_vm;
mod time_fmt;

pub use exam_vm::{ExamVm, QuizIntent, nav_target, start_attempt};
pub use scoreboard_vm::{StandingVm, map_standings};
pub use section_vm::{SectionResultVm, SectionVm, map_sections};
pub use time_fmt::{format_countdown, format_datetime, format_duration_mins};
