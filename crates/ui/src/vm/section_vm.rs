use client::SectionOverview;

use super::time_fmt::format_datetime;

/// Completion block rendered on a finished section's card.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionResultVm {
    pub score: String,
    pub correct: usize,
    pub wrong: usize,
    pub blank: usize,
    pub pending: usize,
    pub window: String,
}

/// One section card on the home screen.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionVm {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub result: Option<SectionResultVm>,
}

#[must_use]
pub fn map_sections(sections: Vec<SectionOverview>) -> Vec<SectionVm> {
    sections
        .into_iter()
        .map(|section| {
            let result = section.result.map(|result| SectionResultVm {
                score: format!("{:.1}", result.score),
                correct: result.report.correct,
                wrong: result.report.wrong,
                blank: result.report.blank,
                pending: result.report.pending,
                window: format!(
                    "{} – {}",
                    format_datetime(result.started_at),
                    format_datetime(result.finished_at)
                ),
            });
            SectionVm {
                id: section.id.value(),
                title: section.title,
                slug: section.slug,
                description: section.description,
                result,
            }
        })
        .collect()
}
