use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use std::sync::Arc;

use cineshelf_core::{models::GenreCatalog, services::MovieDetail};

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct TrailerResponse {
    pub key: String,
    pub name: String,
    pub embed_url: String,
}

pub async fn get_genres(State(state): State<Arc<AppState>>) -> Json<GenreCatalog> {
    Json(state.genre_catalog().await)
}

/// Detail record for the modal, with library membership.
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MovieDetail>> {
    let genres = state.genre_catalog().await;
    let detail =
        MovieDetail::load(&state.tmdb_service, &state.library_service, &genres, id).await?;
    Ok(Json(detail))
}

pub async fn get_trailer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<TrailerResponse>> {
    let videos = state.tmdb_service.movie_videos(id).await?;
    let trailer = videos
        .trailer()
        .ok_or_else(|| ApiError::not_found("Sorry, no trailer available for this movie."))?;

    Ok(Json(TrailerResponse {
        key: trailer.key.clone(),
        name: trailer.name.clone(),
        embed_url: trailer.embed_url(),
    }))
}
