use serde::{Deserialize, Deserializer, Serialize};

/// A cell in an existing column is always `Some`, even when empty. Only a
/// missing column leaves the field `None`.
fn present_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

/// One row of `for_reir.csv` / `for_inex.csv`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleRecord {
    pub title: String,
    pub summary: String,
    #[serde(rename = "translatedDescription")]
    pub translated_description: String,
    pub description: String,
    #[serde(
        rename = "importDateUTC",
        deserialize_with = "present_cell",
        skip_serializing_if = "Option::is_none"
    )]
    pub import_date_utc: Option<String>,
    /// Free-text location hints forwarded to the extractor.
    #[serde(deserialize_with = "present_cell", skip_serializing_if = "Option::is_none")]
    pub locations: Option<String>,
}

/// One row of `result_outsum.csv`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryRow {
    pub prompt: String,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub relevant: i64,
    pub reason: String,
}

impl ClassificationResult {
    pub fn unreachable() -> Self {
        Self {
            relevant: 0,
            reason: "Error reaching prediction server.".to_string(),
        }
    }

    pub fn is_relevant(&self) -> bool {
        self.relevant == 1
    }

    pub fn verdict(&self) -> &'static str {
        if self.is_relevant() {
            "✅ Relevant"
        } else {
            "❌ Irrelevant"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub disease: String,
    pub location: String,
    pub date: String,
    pub cases: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl ExtractionResult {
    pub fn unreachable() -> Self {
        Self {
            disease: "-".to_string(),
            location: "-".to_string(),
            date: "-".to_string(),
            cases: "Error reaching extraction server.".to_string(),
            country: None,
        }
    }
}

/// Whatever a settled drop target displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropResult {
    Classification(ClassificationResult),
    Extraction(ExtractionResult),
}

impl DropResult {
    /// Label/value pairs in display order.
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        match self {
            DropResult::Classification(c) => vec![
                ("Relevance Result", c.verdict().to_string()),
                ("Reason", c.reason.clone()),
            ],
            DropResult::Extraction(e) => {
                let mut lines = vec![
                    ("Disease", e.disease.clone()),
                    ("Location", e.location.clone()),
                ];
                if let Some(country) = &e.country {
                    lines.push(("Country", country.clone()));
                }
                lines.push(("Date", e.date.clone()));
                lines.push(("Cases", e.cases.clone()));
                lines
            }
        }
    }
}
