use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Genre, GenreCatalog};

/// A movie record as TMDB returns it.
///
/// Only `id` is typed. Every other field is kept as received, nulls and
/// unknown keys included, so a saved record is written back unchanged.
/// Accessors read the fields leniently: a missing, null or mistyped value
/// reads as empty.
///
/// List, search and trending endpoints carry `genre_ids`; the detail endpoint
/// carries `genres`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Movie {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self::with_id(id).with_field("title", title.into())
    }

    /// A record holding nothing but its id.
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Raw value of any field other than `id`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn title(&self) -> &str {
        self.str_field("title").unwrap_or_default()
    }

    pub fn overview(&self) -> &str {
        self.str_field("overview").unwrap_or_default()
    }

    pub fn release_date(&self) -> &str {
        self.str_field("release_date").unwrap_or_default()
    }

    pub fn poster_path(&self) -> Option<&str> {
        self.str_field("poster_path").filter(|p| !p.is_empty())
    }

    pub fn backdrop_path(&self) -> Option<&str> {
        self.str_field("backdrop_path").filter(|p| !p.is_empty())
    }

    /// Ids from `genre_ids`; non-integer entries are skipped.
    pub fn genre_ids(&self) -> Vec<i32> {
        self.fields
            .get("genre_ids")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_i64)
            .filter_map(|id| i32::try_from(id).ok())
            .collect()
    }

    /// Embedded `genres` objects; entries without an integer id and a name are skipped.
    pub fn genres(&self) -> Vec<Genre> {
        self.fields
            .get("genres")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|g| Genre::deserialize(g).ok())
            .collect()
    }

    /// Genre ids from whichever shape the record carries, in record order, without duplicates.
    pub fn genre_memberships(&self) -> Vec<i32> {
        let from_objects = self.genres().into_iter().map(|g| g.id);

        let mut ids = Vec::new();
        for id in self.genre_ids().into_iter().chain(from_objects) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    pub fn has_genre(&self, genre_id: i32) -> bool {
        self.genre_memberships().contains(&genre_id)
    }

    /// Year of `release_date`, `None` when the date is empty or malformed.
    pub fn release_year(&self) -> Option<i32> {
        NaiveDate::parse_from_str(self.release_date(), "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }

    /// Display names of the record's genres, at most `limit` of them.
    ///
    /// Embedded `genres` win; otherwise `genre_ids` are resolved against the
    /// catalog and ids the catalog does not know are skipped.
    pub fn genre_labels(&self, catalog: &GenreCatalog, limit: usize) -> Vec<String> {
        let genres = self.genres();
        if !genres.is_empty() {
            return genres.into_iter().take(limit).map(|g| g.name).collect();
        }

        self.genre_ids()
            .into_iter()
            .filter_map(|id| catalog.name(id))
            .take(limit)
            .map(str::to_string)
            .collect()
    }
}
