use serde::Serialize;

use crate::error::Result;
use crate::models::{GenreCatalog, Movie};
use crate::services::{LibraryService, TmdbService};

const POSTER_SIZE: &str = "w500";

/// Which movie's detail modal is open, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    open: Option<i64>,
}

impl Selection {
    pub fn current(&self) -> Option<i64> {
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Card or button click. Opening another movie replaces the current one.
    pub fn open(&mut self, tmdb_id: i64) {
        self.open = Some(tmdb_id);
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    /// Closes on Escape. Returns whether the key was handled.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key == "Escape" && self.is_open() {
            self.close();
            return true;
        }
        false
    }

    /// Clicks outside the dialog close it; clicks inside do not.
    pub fn handle_click(&mut self, on_backdrop: bool) {
        if on_backdrop {
            self.close();
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MovieDetail {
    pub movie: Movie,
    pub in_library: bool,
    pub genre_labels: Vec<String>,
    pub poster_url: Option<String>,
}

impl MovieDetail {
    pub fn new(movie: Movie, catalog: &GenreCatalog, library: &LibraryService) -> Self {
        Self {
            in_library: library.contains(movie.id),
            genre_labels: movie.genre_labels(catalog, usize::MAX),
            poster_url: movie
                .poster_path()
                .map(|path| TmdbService::poster_url(path, POSTER_SIZE)),
            movie,
        }
    }

    /// Fetches the full record for the modal.
    pub async fn load(
        tmdb: &TmdbService,
        library: &LibraryService,
        catalog: &GenreCatalog,
        tmdb_id: i64,
    ) -> Result<Self> {
        let movie = tmdb.movie_details(tmdb_id).await?;
        Ok(Self::new(movie, catalog, library))
    }

    /// Saves or unsaves the detailed record and updates the flag.
    pub fn toggle_library(&mut self, library: &LibraryService) -> bool {
        self.in_library = library.toggle(&self.movie);
        self.in_library
    }
}
