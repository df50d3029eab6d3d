//! HTTP request handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ApiError;
use crate::domain::watchlist::join_symbols;
use crate::domain::{ChatId, DEFAULT_PAGE_SIZE};
use crate::port::inbound::tracker::TrackerApi;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<dyn TrackerApi>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PriceParams {
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub size: usize,
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub pairs: usize,
}

/// GET /price/{ticker}
pub async fn price(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(params): Query<PriceParams>,
) -> Result<String, ApiError> {
    let quote = state.tracker.price(&ticker, params.refresh).await?;
    Ok(quote.price.to_string())
}

/// POST /watchlist/{chatId}/add/{ticker}
pub async fn add(
    State(state): State<AppState>,
    Path((chat_id, ticker)): Path<(i64, String)>,
) -> Result<StatusCode, ApiError> {
    state.tracker.add(ChatId::new(chat_id), &ticker).await?;
    Ok(StatusCode::OK)
}

/// DELETE /watchlist/{chatId}/remove/{ticker}
pub async fn remove(
    State(state): State<AppState>,
    Path((chat_id, ticker)): Path<(i64, String)>,
) -> Result<String, ApiError> {
    let removed = state.tracker.remove(ChatId::new(chat_id), &ticker).await?;
    Ok(removed.to_string())
}

/// GET /watchlist/{chatId}
pub async fn watchlist(
    State(state): State<AppState>,
    Path(chat_id): Path<i64>,
) -> Result<String, ApiError> {
    let list = state.tracker.watchlist(ChatId::new(chat_id)).await?;
    Ok(join_symbols(&list))
}

/// GET /watchlist/chatIds
pub async fn chat_ids(State(state): State<AppState>) -> Result<String, ApiError> {
    let ids = state.tracker.chat_ids().await?;
    Ok(ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(","))
}

/// GET /pairs?page=&size=
pub async fn pairs(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<String, ApiError> {
    let items = state.tracker.pairs(params.page, params.size).await?;
    debug!(page = params.page, size = params.size, count = items.len(), "Serving pairs");
    Ok(items
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(","))
}

/// GET /pairs/count
pub async fn pair_count(State(state): State<AppState>) -> Result<String, ApiError> {
    Ok(state.tracker.pair_count().await?.to_string())
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Result<Json<Health>, ApiError> {
    let pairs = state.tracker.pair_count().await?;
    Ok(Json(Health {
        status: "ok".into(),
        pairs,
    }))
}
