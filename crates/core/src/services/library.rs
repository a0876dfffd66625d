use std::sync::{Arc, Mutex};

use crate::models::{Movie, StorageKey};
use crate::storage::KeyValueStore;

/// The saved-movie collection, persisted as one JSON array under `myLibrary`.
///
/// Reads never fail: a missing or unreadable value is an empty library.
/// Writes are best effort: a storage failure is logged and dropped, so callers
/// that need durability must confirm with `load_all`.
pub struct LibraryService {
    store: Arc<dyn KeyValueStore>,
    // Serialises read-modify-write cycles on the stored array.
    writer: Mutex<()>,
}

impl LibraryService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            writer: Mutex::new(()),
        }
    }

    pub fn load_all(&self) -> Vec<Movie> {
        let key = StorageKey::Library.as_str();

        let bytes = match self.store.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Library read failed, treating as empty");
                return Vec::new();
            }
        };

        let records: Vec<serde_json::Value> = match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "Stored library is not valid JSON, treating as empty");
                return Vec::new();
            }
        };

        // Decoded per record: a bad entry drops only itself.
        records
            .into_iter()
            .filter_map(|record| match serde_json::from_value(record) {
                Ok(movie) => Some(movie),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping library record without a usable id");
                    None
                }
            })
            .collect()
    }

    pub fn contains(&self, tmdb_id: i64) -> bool {
        self.load_all().iter().any(|m| m.id == tmdb_id)
    }

    /// Appends without checking membership; use `toggle` for add-or-remove.
    pub fn add(&self, movie: Movie) {
        let _guard = self.lock_writer();
        let mut movies = self.load_all();
        movies.push(movie);
        self.write_all(&movies);
    }

    /// Drops every record with this id. Absent ids leave the stored value untouched.
    pub fn remove(&self, tmdb_id: i64) {
        let _guard = self.lock_writer();
        self.remove_from(self.load_all(), tmdb_id);
    }

    /// Adds the movie if absent, removes it if present. Returns the new membership.
    pub fn toggle(&self, movie: &Movie) -> bool {
        let _guard = self.lock_writer();
        let mut movies = self.load_all();

        if movies.iter().any(|m| m.id == movie.id) {
            self.remove_from(movies, movie.id);
            tracing::debug!(tmdb_id = movie.id, "Removed from library");
            false
        } else {
            movies.push(movie.clone());
            self.write_all(&movies);
            tracing::debug!(tmdb_id = movie.id, "Added to library");
            true
        }
    }

    fn remove_from(&self, mut movies: Vec<Movie>, tmdb_id: i64) {
        let before = movies.len();
        movies.retain(|m| m.id != tmdb_id);

        if movies.len() != before {
            self.write_all(&movies);
        }
    }

    fn write_all(&self, movies: &[Movie]) {
        let bytes = match serde_json::to_vec(movies) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize library");
                return;
            }
        };

        if let Err(e) = self.store.set(StorageKey::Library.as_str(), &bytes) {
            tracing::warn!(error = %e, "Library write failed, change not persisted");
        }
    }

    fn lock_writer(&self) -> std::sync::MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
