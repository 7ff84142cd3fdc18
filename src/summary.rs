use serde::Serialize;
use crate::records::SummaryRow;

const BULLET: &str = "- ";

/// A summary card: the model response plus the bullet lines of its prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub response: String,
    pub bullets: String,
}

impl From<&SummaryRow> for SummaryEntry {
    fn from(row: &SummaryRow) -> Self {
        SummaryEntry {
            response: row.response.clone(),
            bullets: bullet_lines(&row.prompt),
        }
    }
}

/// Keeps the prompt lines that start with `- ` once trimmed, in order and
/// otherwise unchanged.
pub fn bullet_lines(prompt: &str) -> String {
    prompt
        .split('\n')
        .filter(|line| line.trim().starts_with(BULLET))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render(rows: &[SummaryRow]) -> Vec<SummaryEntry> {
    rows.iter().map(SummaryEntry::from).collect()
}
