//! Drag-and-drop page state, independent of how it is rendered.
//!
//! Each page moves `Idle → Selected → Pending → Settled`. Every drop issues a
//! new request token; only the response carrying the latest token may settle
//! the page, so a slow reply to an earlier drop cannot overwrite a newer one.

use std::str::FromStr;
use serde::Serialize;

use crate::assets::{EXTRACTION_ASSET, RELEVANCE_ASSET};
use crate::error::{AppError, Result};
use crate::records::{ArticleRecord, ClassificationResult, DropResult, ExtractionResult};
use crate::remote::PredictionClient;

/// Characters of summary shown in the article list.
pub const SUMMARY_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoKind {
    Relevance,
    Extraction,
}

impl DemoKind {
    pub const ALL: [DemoKind; 2] = [DemoKind::Relevance, DemoKind::Extraction];

    pub fn slug(self) -> &'static str {
        match self {
            DemoKind::Relevance => "relevance",
            DemoKind::Extraction => "extraction",
        }
    }

    pub fn asset(self) -> &'static str {
        match self {
            DemoKind::Relevance => RELEVANCE_ASSET,
            DemoKind::Extraction => EXTRACTION_ASSET,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DemoKind::Relevance => "Relevance Classifier",
            DemoKind::Extraction => "Information Extraction",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            DemoKind::Relevance => "Drag an article here to classify",
            DemoKind::Extraction => "Drop an article here to extract data",
        }
    }

    pub fn loading_text(self) -> &'static str {
        match self {
            DemoKind::Relevance => "Running classification...",
            DemoKind::Extraction => "Extracting...",
        }
    }

    /// Shown when the remote call fails for any reason.
    pub fn fallback(self) -> DropResult {
        match self {
            DemoKind::Relevance => DropResult::Classification(ClassificationResult::unreachable()),
            DemoKind::Extraction => DropResult::Extraction(ExtractionResult::unreachable()),
        }
    }

    /// Sends `article` to this page's endpoint. Failures degrade to [`DemoKind::fallback`].
    pub async fn run(self, client: &PredictionClient, article: &ArticleRecord) -> DropResult {
        let outcome = match self {
            DemoKind::Relevance => client.predict(article).await.map(DropResult::Classification),
            DemoKind::Extraction => client.extract(article).await.map(DropResult::Extraction),
        };

        outcome.unwrap_or_else(|e| {
            tracing::error!(page = self.slug(), "{} request failed: {}", self.slug(), e);
            self.fallback()
        })
    }
}

impl FromStr for DemoKind {
    type Err = AppError;

    fn from_str(slug: &str) -> Result<Self> {
        DemoKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == slug)
            .ok_or_else(|| AppError::UnknownPage(slug.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "result", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Selected,
    Pending,
    Settled(DropResult),
}

/// Handed out by [`DropTarget::on_drop`]; the caller performs the request and
/// returns the outcome together with the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub token: u64,
    pub index: usize,
    pub article: ArticleRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub index: usize,
    pub title: String,
    pub summary: String,
}

/// Snapshot of a page for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub kind: DemoKind,
    pub selected: Option<ArticleRecord>,
    pub loading: bool,
    pub token: u64,
    #[serde(flatten)]
    pub phase: Phase,
}

#[derive(Debug)]
pub struct DropTarget {
    kind: DemoKind,
    records: Vec<ArticleRecord>,
    selected: Option<usize>,
    phase: Phase,
    token: u64,
}

impl DropTarget {
    pub fn new(kind: DemoKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
            selected: None,
            phase: Phase::Idle,
            token: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Replaces the article list and returns to `Idle`. Outstanding requests
    /// are orphaned: their tokens no longer match.
    pub fn load(&mut self, records: Vec<ArticleRecord>) {
        self.records = records;
        self.selected = None;
        self.phase = Phase::Idle;
        self.token += 1;
    }

    /// The drag payload for row `index`.
    pub fn drag_payload(&self, index: usize) -> Option<String> {
        (index < self.records.len()).then(|| index.to_string())
    }

    pub fn list(&self) -> Vec<ListItem> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, a)| ListItem {
                index,
                title: if a.title.is_empty() { "(No title)".to_string() } else { a.title.clone() },
                summary: a.summary.chars().take(SUMMARY_PREVIEW_CHARS).collect(),
            })
            .collect()
    }

    /// Resolves a drag payload and makes that record the selection, clearing
    /// any previous result.
    pub fn select(&mut self, payload: &str) -> Result<usize> {
        let index = payload
            .trim()
            .parse::<usize>()
            .map_err(|_| AppError::DropError(format!("{:?} is not a row index", payload)))?;
        if index >= self.records.len() {
            return Err(AppError::DropError(format!(
                "row {} out of range ({} articles loaded)",
                index,
                self.records.len()
            )));
        }

        self.selected = Some(index);
        self.phase = Phase::Selected;
        Ok(index)
    }

    /// Moves a selected page to `Pending` under a fresh token.
    pub fn begin(&mut self) -> Result<Ticket> {
        let index = match (&self.phase, self.selected) {
            (Phase::Selected, Some(index)) => index,
            _ => return Err(AppError::DropError("no article selected".to_string())),
        };

        self.token += 1;
        self.phase = Phase::Pending;
        Ok(Ticket {
            token: self.token,
            index,
            article: self.records[index].clone(),
        })
    }

    /// A drop event: select then begin.
    pub fn on_drop(&mut self, payload: &str) -> Result<Ticket> {
        self.select(payload)?;
        let ticket = self.begin()?;
        tracing::debug!(page = self.kind.slug(), index = ticket.index, token = ticket.token, "article dropped");
        Ok(ticket)
    }

    /// Applies a response. Returns `false` (and changes nothing) for stale tokens.
    pub fn settle(&mut self, token: u64, result: DropResult) -> bool {
        if token != self.token || self.phase != Phase::Pending {
            tracing::debug!(page = self.kind.slug(), token, current = self.token, "discarding stale response");
            return false;
        }
        self.phase = Phase::Settled(result);
        true
    }

    pub fn view(&self) -> PageView {
        PageView {
            kind: self.kind,
            selected: self.selected.map(|i| self.records[i].clone()),
            loading: self.phase == Phase::Pending,
            token: self.token,
            phase: self.phase.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            summary: format!("{} summary", title),
            ..Default::default()
        }
    }

    fn loaded(kind: DemoKind) -> DropTarget {
        let mut target = DropTarget::new(kind);
        target.load(vec![article("first"), article("second"), article("third")]);
        target
    }

    fn relevant(reason: &str) -> DropResult {
        DropResult::Classification(ClassificationResult { relevant: 1, reason: reason.to_string() })
    }

    #[test]
    fn kinds_parse_from_their_slugs() {
        for kind in DemoKind::ALL {
            assert_eq!(kind.slug().parse::<DemoKind>().unwrap(), kind);
        }
        assert!(matches!("summary".parse::<DemoKind>(), Err(AppError::UnknownPage(_))));
    }

    #[test]
    fn starts_idle() {
        let target = loaded(DemoKind::Relevance);
        let view = target.view();
        assert_eq!(view.phase, Phase::Idle);
        assert_eq!(view.selected, None);
        assert!(!view.loading);
    }

    #[test]
    fn drop_selects_exactly_the_dragged_record() {
        let mut target = loaded(DemoKind::Relevance);
        let payload = target.drag_payload(1).unwrap();
        let ticket = target.on_drop(&payload).unwrap();

        assert_eq!(ticket.article.title, "second");
        let view = target.view();
        assert_eq!(view.selected.unwrap().title, "second");
        assert_eq!(view.phase, Phase::Pending);
        assert!(view.loading);
    }

    #[test]
    fn settle_shows_result_and_clears_loading() {
        let mut target = loaded(DemoKind::Relevance);
        let ticket = target.on_drop("0").unwrap();
        assert!(target.settle(ticket.token, relevant("matches outbreak keywords")));

        let view = target.view();
        assert!(!view.loading);
        assert_eq!(view.phase, Phase::Settled(relevant("matches outbreak keywords")));
    }

    #[test]
    fn redrop_clears_previous_result() {
        let mut target = loaded(DemoKind::Extraction);
        let first = target.on_drop("0").unwrap();
        target.settle(first.token, DemoKind::Extraction.fallback());

        target.on_drop("2").unwrap();
        let view = target.view();
        assert_eq!(view.phase, Phase::Pending);
        assert_eq!(view.selected.unwrap().title, "third");
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut target = loaded(DemoKind::Relevance);
        let slow = target.on_drop("0").unwrap();
        let fast = target.on_drop("1").unwrap();

        assert!(target.settle(fast.token, relevant("newer")));
        assert!(!target.settle(slow.token, relevant("older")));
        assert_eq!(target.phase(), &Phase::Settled(relevant("newer")));

        // Also while the newer request is still pending.
        let pending = target.on_drop("2").unwrap();
        assert!(!target.settle(fast.token, relevant("late")));
        assert_eq!(target.phase(), &Phase::Pending);
        assert!(target.settle(pending.token, relevant("latest")));
    }

    #[test]
    fn reload_orphans_in_flight_requests() {
        let mut target = loaded(DemoKind::Relevance);
        let ticket = target.on_drop("0").unwrap();
        target.load(vec![article("fresh")]);

        assert!(!target.settle(ticket.token, relevant("orphan")));
        assert_eq!(target.phase(), &Phase::Idle);
    }

    #[test]
    fn invalid_payload_leaves_state_untouched() {
        let mut target = loaded(DemoKind::Relevance);
        let ticket = target.on_drop("1").unwrap();
        target.settle(ticket.token, relevant("kept"));

        assert!(matches!(target.on_drop("7"), Err(AppError::DropError(_))));
        assert!(matches!(target.on_drop("abc"), Err(AppError::DropError(_))));
        assert_eq!(target.phase(), &Phase::Settled(relevant("kept")));
        assert_eq!(target.view().selected.unwrap().title, "second");
    }

    #[test]
    fn begin_requires_a_selection() {
        let mut target = loaded(DemoKind::Relevance);
        assert!(target.begin().is_err());

        target.select("2").unwrap();
        assert_eq!(target.phase(), &Phase::Selected);
        assert_eq!(target.begin().unwrap().index, 2);
    }

    #[test]
    fn list_truncates_summary_and_names_untitled_rows() {
        let mut target = DropTarget::new(DemoKind::Relevance);
        target.load(vec![ArticleRecord {
            summary: "é".repeat(150),
            ..Default::default()
        }]);

        let items = target.list();
        assert_eq!(items[0].title, "(No title)");
        assert_eq!(items[0].summary.chars().count(), SUMMARY_PREVIEW_CHARS);
        assert_eq!(target.drag_payload(1), None);
    }
}
