use axum::{
    routing::{get, post},
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::services::ServeDir;

use crate::error::Result;
use crate::api::models::{ArticleList, DropAccepted};
use crate::api::{pages, response};
use crate::assets::{self, SUMMARY_ASSET};
use crate::page::DemoKind;
use crate::records::SummaryRow;
use crate::summary;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    let public = ServeDir::new(&app_state.config.public_dir);

    Router::new()
        .route("/", get(index_handler))
        .route("/relevance", get(relevance_page))
        .route("/extraction", get(extraction_page))
        .route("/summary", get(summary_page))
        .route("/api/summary", get(summary_handler))
        .route("/api/:kind/articles", get(articles_handler))
        .route("/api/:kind/state", get(state_handler))
        .route("/api/:kind/drop", post(drop_handler))
        .fallback_service(public)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn index_handler() -> Html<String> {
    Html(pages::index())
}

fn render_drop_page(state: &AppState, kind: DemoKind) -> Html<String> {
    let page = state.page(kind);
    Html(pages::drop_page(&page.view(), &page.list()))
}

async fn relevance_page(State(state): State<AppState>) -> Html<String> {
    render_drop_page(&state, DemoKind::Relevance)
}

async fn extraction_page(State(state): State<AppState>) -> Html<String> {
    render_drop_page(&state, DemoKind::Extraction)
}

/// The summary CSV is re-read on every visit.
async fn load_summaries(state: &AppState) -> Vec<summary::SummaryEntry> {
    let rows: Vec<SummaryRow> = assets::load_csv(&state.config.public_dir, SUMMARY_ASSET, None).await;
    summary::render(&rows)
}

async fn summary_page(State(state): State<AppState>) -> Html<String> {
    Html(pages::summary_page(&load_summaries(&state).await))
}

async fn summary_handler(State(state): State<AppState>) -> impl IntoResponse {
    response::success(load_summaries(&state).await)
}

async fn articles_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<impl IntoResponse> {
    let kind: DemoKind = kind.parse()?;
    let articles = state.page(kind).list();
    Ok(response::success(ArticleList { kind, articles }))
}

async fn state_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<impl IntoResponse> {
    let kind: DemoKind = kind.parse()?;
    let view = state.page(kind).view();
    Ok(response::success(view))
}

async fn drop_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    payload: String,
) -> Result<impl IntoResponse> {
    let kind: DemoKind = kind.parse()?;
    let ticket = state.drop_article(kind, &payload)?;
    tracing::info!(page = kind.slug(), index = ticket.index, token = ticket.token, "drop accepted");

    Ok(response::with_status(
        StatusCode::ACCEPTED,
        DropAccepted {
            token: ticket.token,
            index: ticket.index,
            selected: ticket.article,
        },
    ))
}
