//! Test helpers for stubbing TMDB, faking storage and building fixtures

use axum::Router;

use crate::error::{Error, Result};
use crate::storage::{KeyValueStore, MemoryStore};

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Stub listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Stub server failed");
    });

    format!("http://{}", addr)
}

/// A store whose reads work but whose writes always fail, like a full quota.
#[derive(Debug, Default)]
pub struct FullStore {
    inner: MemoryStore,
}

impl FullStore {
    pub fn with_value(key: &str, value: &[u8]) -> Self {
        let inner = MemoryStore::new();
        inner.set(key, value).expect("Failed to seed store");
        Self { inner }
    }
}

impl KeyValueStore for FullStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &[u8]) -> Result<()> {
        Err(Error::Storage("quota exceeded".to_string()))
    }
}

/// Test fixtures for common test data
pub mod fixtures {
    use crate::models::{Genre, GenreCatalog, Movie};

    /// A record shaped like a list/search/trending result.
    pub fn listed_movie(id: i64, title: &str, genre_ids: &[i32]) -> Movie {
        Movie::new(id, title)
            .with_field("genre_ids", genre_ids.to_vec())
            .with_field("release_date", "2024-05-01")
    }

    /// A record shaped like a `/movie/{id}` detail response.
    pub fn detailed_movie(id: i64, title: &str, genres: &[(i32, &str)]) -> Movie {
        let genres: Vec<Genre> = genres
            .iter()
            .map(|(id, name)| Genre::new(*id, *name))
            .collect();
        Movie::new(id, title).with_field("genres", serde_json::json!(genres))
    }

    pub fn genre_catalog() -> GenreCatalog {
        GenreCatalog::new(vec![
            Genre::new(12, "Adventure"),
            Genre::new(16, "Animation"),
            Genre::new(18, "Drama"),
            Genre::new(28, "Action"),
        ])
    }
}
