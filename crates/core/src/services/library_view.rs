use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::models::Movie;

pub const WINDOW_STEP: usize = 9;

pub const EMPTY_LIBRARY_MESSAGE: &str = "You don't have any movies in your library yet.";
pub const NO_GENRE_MATCH_MESSAGE: &str = "No movies found with this genre.";

/// Genre picker value: `"all"` or a numeric TMDB genre id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenreSelection {
    #[default]
    All,
    Genre(i32),
}

impl FromStr for GenreSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(GenreSelection::All);
        }
        s.parse()
            .map(GenreSelection::Genre)
            .map_err(|_| Error::Validation(format!("unknown genre: {:?}", s)))
    }
}

impl fmt::Display for GenreSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreSelection::All => f.write_str("all"),
            GenreSelection::Genre(id) => write!(f, "{}", id),
        }
    }
}

impl Serialize for GenreSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GenreSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Keeps movies tagged with the selected genre, in input order.
///
/// A record matches when the id is in its `genre_ids` or in its `genres`.
pub fn filter_by_genre(movies: &[Movie], selection: GenreSelection) -> Vec<Movie> {
    match selection {
        GenreSelection::All => movies.to_vec(),
        GenreSelection::Genre(id) => movies.iter().filter(|m| m.has_genre(id)).cloned().collect(),
    }
}

/// How many filtered items are revealed; grows by [`WINDOW_STEP`] per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadMoreWindow {
    visible_count: usize,
}

impl Default for LoadMoreWindow {
    fn default() -> Self {
        Self {
            visible_count: WINDOW_STEP,
        }
    }
}

impl LoadMoreWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Uncapped; may run past the collection size.
    pub fn load_more(&mut self) {
        self.visible_count += WINDOW_STEP;
    }

    pub fn reset(&mut self) {
        self.visible_count = WINDOW_STEP;
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible_count.min(items.len())]
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible_count < total
    }
}

/// A library record with its genre ids resolved once, whatever shape it arrived in.
#[derive(Debug, Clone)]
struct IndexedMovie {
    movie: Movie,
    genre_ids: Vec<i32>,
}

impl From<Movie> for IndexedMovie {
    fn from(movie: Movie) -> Self {
        let genre_ids = movie.genre_memberships();
        Self { movie, genre_ids }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LibraryPage {
    pub genre: GenreSelection,
    pub movies: Vec<Movie>,
    pub visible_count: usize,
    pub matching: usize,
    pub total: usize,
    pub has_more: bool,
    pub empty_message: Option<&'static str>,
}

/// The library screen: saved movies, the genre picker and the load-more window.
#[derive(Debug, Clone, Default)]
pub struct LibraryBrowser {
    movies: Vec<IndexedMovie>,
    selection: GenreSelection,
    window: LoadMoreWindow,
}

impl LibraryBrowser {
    pub fn new(movies: Vec<Movie>) -> Self {
        let mut browser = Self::default();
        browser.set_library(movies);
        browser
    }

    /// Replaces the contents after a reload. The window is left where it was.
    pub fn set_library(&mut self, movies: Vec<Movie>) {
        self.movies = movies.into_iter().map(IndexedMovie::from).collect();
    }

    pub fn selection(&self) -> GenreSelection {
        self.selection
    }

    /// Concrete genres reset the window; switching back to "all" does not.
    pub fn select_genre(&mut self, selection: GenreSelection) {
        self.selection = selection;
        if selection != GenreSelection::All {
            self.window.reset();
        }
    }

    pub fn load_more(&mut self) {
        self.window.load_more();
    }

    pub fn window(&self) -> LoadMoreWindow {
        self.window
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn filtered(&self) -> Vec<&Movie> {
        self.movies
            .iter()
            .filter(|m| match self.selection {
                GenreSelection::All => true,
                GenreSelection::Genre(id) => m.genre_ids.contains(&id),
            })
            .map(|m| &m.movie)
            .collect()
    }

    pub fn visible(&self) -> Vec<&Movie> {
        let filtered = self.filtered();
        self.window.slice(&filtered).to_vec()
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        if self.movies.is_empty() {
            Some(EMPTY_LIBRARY_MESSAGE)
        } else if self.filtered().is_empty() {
            Some(NO_GENRE_MATCH_MESSAGE)
        } else {
            None
        }
    }

    pub fn page(&self) -> LibraryPage {
        let filtered = self.filtered();
        LibraryPage {
            genre: self.selection,
            movies: self.window.slice(&filtered).iter().map(|&m| m.clone()).collect(),
            visible_count: self.window.visible_count(),
            matching: filtered.len(),
            total: self.movies.len(),
            has_more: self.window.has_more(filtered.len()),
            empty_message: self.empty_message(),
        }
    }
}
