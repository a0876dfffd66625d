use axum::{Json, extract::State};
use std::sync::Arc;

use cineshelf_core::services::{HomeFeed, HomeSources};

use crate::AppState;

/// Hero, weekly trends and an upcoming pick. Upstream failures become a banner, never an error status.
pub async fn get_home(State(state): State<Arc<AppState>>) -> Json<HomeFeed> {
    let sources = HomeSources::fetch(&state.tmdb_service).await;
    state.remember_genres(&sources.genres).await;

    let feed = sources.assemble(&state.library_service, &mut rand::rng());
    Json(feed)
}
