use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use cineshelf_core::{
    models::Movie,
    services::{GenreSelection, library_view::LibraryPage},
};

use crate::{ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct LibraryQuery {
    pub genre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenreUpdate {
    pub genre: GenreSelection,
}

#[derive(Debug, Serialize)]
pub struct Membership {
    pub id: i64,
    pub in_library: bool,
}

/// Re-reads the store so the page reflects toggles made elsewhere.
async fn current_page(state: &AppState, genre: Option<GenreSelection>) -> LibraryPage {
    let movies = state.library_service.load_all();

    let mut browser = state.library_browser.lock().await;
    browser.set_library(movies);
    if let Some(genre) = genre {
        if genre != browser.selection() {
            browser.select_genre(genre);
        }
    }
    browser.page()
}

pub async fn get_library(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LibraryQuery>,
) -> ApiResult<Json<LibraryPage>> {
    let genre = query
        .genre
        .as_deref()
        .map(str::parse::<GenreSelection>)
        .transpose()?;
    Ok(Json(current_page(&state, genre).await))
}

/// Switching to a concrete genre resets the load-more window; re-selecting the current one does not.
pub async fn select_genre(
    State(state): State<Arc<AppState>>,
    Json(update): Json<GenreUpdate>,
) -> Json<LibraryPage> {
    Json(current_page(&state, Some(update.genre)).await)
}

pub async fn load_more(State(state): State<Arc<AppState>>) -> Json<LibraryPage> {
    state.library_browser.lock().await.load_more();
    Json(current_page(&state, None).await)
}

pub async fn get_membership(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Json<Membership> {
    Json(Membership {
        id,
        in_library: state.library_service.contains(id),
    })
}

/// Saves the posted record if absent, removes it if present.
pub async fn toggle(
    State(state): State<Arc<AppState>>,
    Json(movie): Json<Movie>,
) -> Json<Membership> {
    let in_library = state.library_service.toggle(&movie);
    Json(Membership {
        id: movie.id,
        in_library,
    })
}

pub async fn remove(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> StatusCode {
    state.library_service.remove(id);
    StatusCode::NO_CONTENT
}
