use axum::{Json, extract::State};
use std::sync::Arc;

use cineshelf_core::models::ThemeUpdate;

use crate::{ApiResult, AppState};

pub async fn get_theme(State(state): State<Arc<AppState>>) -> Json<ThemeUpdate> {
    Json(ThemeUpdate {
        theme: state.settings_service.theme(),
    })
}

pub async fn update_theme(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ThemeUpdate>,
) -> ApiResult<Json<ThemeUpdate>> {
    let theme = state.settings_service.set_theme(update.theme)?;
    Ok(Json(ThemeUpdate { theme }))
}
