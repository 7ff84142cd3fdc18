pub mod api;
pub mod assets;
pub mod config;
pub mod error;
pub mod logging;
pub mod page;
pub mod records;
pub mod remote;
pub mod summary;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use config::Config;
use error::Result;
use page::{DemoKind, DropTarget, Ticket};
use remote::PredictionClient;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: PredictionClient,
    relevance: Arc<Mutex<DropTarget>>,
    extraction: Arc<Mutex<DropTarget>>,
}

impl AppState {
    /// Builds state with empty pages; see [`AppState::reload`].
    pub fn new(config: Config) -> Result<Self> {
        let client = PredictionClient::new(config.prediction_server.clone(), config.prediction_timeout)?;
        Ok(Self {
            config: Arc::new(config),
            client,
            relevance: Arc::new(Mutex::new(DropTarget::new(DemoKind::Relevance))),
            extraction: Arc::new(Mutex::new(DropTarget::new(DemoKind::Extraction))),
        })
    }

    pub async fn load(config: Config) -> Result<Self> {
        let state = Self::new(config)?;
        state.reload().await;
        Ok(state)
    }

    /// Re-reads both article assets. Pages return to idle.
    pub async fn reload(&self) {
        for kind in DemoKind::ALL {
            let records = assets::load_csv(
                &self.config.public_dir,
                kind.asset(),
                Some(assets::ARTICLE_DISPLAY_CAP),
            )
            .await;
            self.page(kind).load(records);
        }
    }

    fn target(&self, kind: DemoKind) -> &Arc<Mutex<DropTarget>> {
        match kind {
            DemoKind::Relevance => &self.relevance,
            DemoKind::Extraction => &self.extraction,
        }
    }

    /// Locks a page. The guard must not be held across an `.await`.
    pub fn page(&self, kind: DemoKind) -> MutexGuard<'_, DropTarget> {
        // Transitions never panic midway, so a poisoned lock still holds a valid state.
        self.target(kind).lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies a drop and starts the remote request in the background.
    ///
    /// Returns once the page is `Pending`; the spawned task settles it.
    pub fn drop_article(&self, kind: DemoKind, payload: &str) -> Result<Ticket> {
        let ticket = self.page(kind).on_drop(payload)?;

        let target = Arc::clone(self.target(kind));
        let client = self.client.clone();
        let request = ticket.clone();
        tokio::spawn(async move {
            let result = kind.run(&client, &request.article).await;
            let applied = target
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .settle(request.token, result);
            tracing::info!(page = kind.slug(), token = request.token, applied, "request settled");
        });

        Ok(ticket)
    }
}
