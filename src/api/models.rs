use serde::Serialize;

use crate::page::{DemoKind, ListItem};
use crate::records::ArticleRecord;

#[derive(Serialize)]
pub struct ArticleList {
    pub kind: DemoKind,
    pub articles: Vec<ListItem>,
}

/// Returned as soon as a drop is accepted, before the remote call resolves.
#[derive(Serialize)]
pub struct DropAccepted {
    pub token: u64,
    pub index: usize,
    pub selected: ArticleRecord,
}
