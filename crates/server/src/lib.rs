use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tokio::sync::{Mutex, RwLock};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use cineshelf_core::{
    Config,
    models::GenreCatalog,
    services::{CatalogController, LibraryBrowser, LibraryService, SettingsService, TmdbService},
    storage::{FileStore, KeyValueStore},
};

pub mod error;
pub mod routes;

pub use error::{ApiError, ApiResult};

use routes::{catalog, home, library, movies, settings};

/// One interactive session: the services plus the screen state they drive.
pub struct AppState {
    pub tmdb_service: TmdbService,
    pub library_service: LibraryService,
    pub settings_service: SettingsService,
    pub catalog: Mutex<CatalogController>,
    pub library_browser: Mutex<LibraryBrowser>,
    genres: RwLock<Option<GenreCatalog>>,
}

impl AppState {
    pub fn new(tmdb_service: TmdbService, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            tmdb_service,
            library_service: LibraryService::new(store.clone()),
            settings_service: SettingsService::new(store),
            catalog: Mutex::new(CatalogController::new()),
            library_browser: Mutex::new(LibraryBrowser::default()),
            genres: RwLock::new(None),
        }
    }

    /// Genre list, fetched on first use and kept for the session.
    ///
    /// A failed fetch yields an empty catalog and is retried next time.
    pub async fn genre_catalog(&self) -> GenreCatalog {
        if let Some(genres) = self.genres.read().await.as_ref() {
            return genres.clone();
        }

        match self.tmdb_service.genres().await {
            Ok(genres) => {
                self.remember_genres(&genres).await;
                genres
            }
            Err(e) => {
                tracing::warn!(error = %e, "Genre list unavailable");
                GenreCatalog::default()
            }
        }
    }

    pub async fn remember_genres(&self, genres: &GenreCatalog) {
        if genres.is_empty() {
            return;
        }
        let mut cached = self.genres.write().await;
        if cached.is_none() {
            *cached = Some(genres.clone());
        }
    }
}

/// Options for the HTTP host that are not part of the core [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Built front end (`index.html` plus assets). `None` serves the API only.
    pub static_dir: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            static_dir: std::env::var("STATIC_DIR").ok().filter(|d| !d.is_empty()),
        }
    }
}

/// Creates the application state with all services initialized
pub fn create_app_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let store = FileStore::open(&config.storage_dir)?;
    tracing::info!(dir = %store.dir().display(), "Storage ready");

    Ok(Arc::new(AppState::new(
        TmdbService::from_config(config),
        Arc::new(store),
    )))
}

/// Creates the router with all routes configured
pub fn create_router(state: Arc<AppState>, static_dir: Option<&str>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Serve static frontend files if directory is configured
    if let Some(dir) = static_dir {
        let index_path = format!("{}/index.html", dir);
        if std::path::Path::new(&index_path).exists() {
            tracing::info!("Serving static files from: {}", dir);
            // Serve static files, with fallback to index.html for SPA routing
            router = router.fallback_service(
                ServeDir::new(dir).not_found_service(ServeFile::new(&index_path)),
            );
        } else {
            tracing::warn!(
                "Static directory configured but index.html not found: {}",
                dir
            );
        }
    }

    router
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Home
        .route("/home", get(home::get_home))
        .route("/genres", get(movies::get_genres))
        // Catalog
        .route("/catalog", get(catalog::get_catalog))
        .route("/catalog/draft", put(catalog::update_draft))
        .route("/catalog/search", post(catalog::submit_search))
        .route("/catalog/clear", post(catalog::clear_search))
        .route("/catalog/page/{page}", put(catalog::set_page))
        .route("/catalog/years", get(catalog::get_years))
        // Movie details
        .route("/movies/{id}", get(movies::get_movie))
        .route("/movies/{id}/trailer", get(movies::get_trailer))
        // Library
        .route("/library", get(library::get_library))
        .route("/library/genre", put(library::select_genre))
        .route("/library/load-more", post(library::load_more))
        .route("/library/toggle", post(library::toggle))
        .route(
            "/library/{id}",
            get(library::get_membership).delete(library::remove),
        )
        // Settings
        .route(
            "/settings/theme",
            get(settings::get_theme).put(settings::update_theme),
        )
}

async fn health_check() -> &'static str {
    "OK"
}

/// Binds `config.server_addr()` and serves until the process exits.
pub async fn start_server(config: Config, server_config: ServerConfig) -> anyhow::Result<()> {
    let state = create_app_state(&config)?;
    let app = create_router(state, server_config.static_dir.as_deref());

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "CineShelf listening");

    axum::serve(listener, app).await?;
    Ok(())
}
