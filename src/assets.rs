use std::path::Path;
use serde::de::DeserializeOwned;
use crate::error::Result;

pub const RELEVANCE_ASSET: &str = "for_reir.csv";
pub const EXTRACTION_ASSET: &str = "for_inex.csv";
pub const SUMMARY_ASSET: &str = "result_outsum.csv";

/// How many articles the drag-and-drop pages list.
pub const ARTICLE_DISPLAY_CAP: usize = 20;

/// Parses CSV text using the header row as field names.
///
/// Blank lines are skipped and ragged rows are tolerated. With a `cap`, rows
/// past it are never parsed.
pub fn parse_csv<T: DeserializeOwned>(text: &str, cap: Option<usize>) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let rows = reader.deserialize::<T>();
    let records = match cap {
        Some(cap) => rows.take(cap).collect::<std::result::Result<Vec<_>, _>>()?,
        None => rows.collect::<std::result::Result<Vec<_>, _>>()?,
    };
    Ok(records)
}

/// Reads `name` from the public directory and parses it.
///
/// Any failure is logged and yields an empty list; the pages render without
/// articles rather than erroring.
pub async fn load_csv<T: DeserializeOwned>(dir: &Path, name: &str, cap: Option<usize>) -> Vec<T> {
    let path = dir.join(name);
    let loaded: Result<Vec<T>> = async {
        let text = tokio::fs::read_to_string(&path).await?;
        parse_csv(&text, cap)
    }
    .await;

    match loaded {
        Ok(records) => {
            tracing::info!(asset = name, count = records.len(), "loaded csv asset");
            records
        }
        Err(e) => {
            tracing::warn!(asset = name, path = %path.display(), "could not load csv asset: {}", e);
            Vec::new()
        }
    }
}
