use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Datelike;
use std::sync::Arc;

use cineshelf_core::services::{
    FetchTicket, MovieSource, SearchQuery,
    catalog::{CatalogSnapshot, year_options},
};

use crate::{ApiError, ApiResult, AppState};

/// Runs the fetch without holding the session lock, then applies it.
///
/// If a newer fetch was issued meanwhile this result is dropped and the
/// snapshot shows the newer fetch still loading.
async fn run_fetch(state: &AppState, ticket: FetchTicket) -> CatalogSnapshot {
    let outcome = state.tmdb_service.fetch_page(&ticket.request).await;

    let mut catalog = state.catalog.lock().await;
    catalog.complete(ticket, outcome);
    catalog.snapshot()
}

/// Current catalog state; the first call loads page 1 of the weekly trends.
pub async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<CatalogSnapshot> {
    let ticket = {
        let mut catalog = state.catalog.lock().await;
        if !catalog.is_fresh() {
            return Json(catalog.snapshot());
        }
        catalog.begin_fetch()
    };

    Json(run_fetch(&state, ticket).await)
}

/// Updates the search inputs without fetching.
pub async fn update_draft(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<SearchQuery>,
) -> Json<CatalogSnapshot> {
    let mut catalog = state.catalog.lock().await;
    catalog.set_draft(draft);
    Json(catalog.snapshot())
}

/// Commits the submitted inputs and loads page 1.
pub async fn submit_search(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<SearchQuery>,
) -> Json<CatalogSnapshot> {
    let ticket = {
        let mut catalog = state.catalog.lock().await;
        catalog.set_draft(draft);
        catalog.submit()
    };

    Json(run_fetch(&state, ticket).await)
}

pub async fn clear_search(State(state): State<Arc<AppState>>) -> Json<CatalogSnapshot> {
    let ticket = state.catalog.lock().await.clear();
    Json(run_fetch(&state, ticket).await)
}

/// Moves to another page; only pages within the capped bound are accepted.
pub async fn set_page(
    State(state): State<Arc<AppState>>,
    Path(page): Path<u32>,
) -> ApiResult<Json<CatalogSnapshot>> {
    let ticket = {
        let mut catalog = state.catalog.lock().await;
        if !catalog.is_selectable(page) {
            return Err(ApiError::bad_request(format!(
                "Page {} is outside 1..={}",
                page,
                catalog.page_bound()
            )));
        }
        catalog.set_page(page)
    };

    Ok(Json(run_fetch(&state, ticket).await))
}

pub async fn get_years() -> Json<Vec<i32>> {
    Json(year_options(chrono::Local::now().year()))
}
