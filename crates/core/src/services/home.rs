use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::error::Result;
use crate::models::{GenreCatalog, Movie, Paged};
use crate::services::{LibraryService, TmdbService};

pub const HOME_ERROR_MESSAGE: &str =
    "We couldn't connect to the movie database. Please check your internet connection.";

const WEEKLY_PICKS: usize = 3;
const CARD_GENRES: usize = 2;

/// Raw feeds for the home screen. Each one degrades to empty on failure and
/// any failure sets the single banner message.
#[derive(Debug, Clone, Default)]
pub struct HomeSources {
    pub daily: Vec<Movie>,
    pub weekly: Vec<Movie>,
    pub upcoming: Vec<Movie>,
    pub genres: GenreCatalog,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingPick {
    pub movie: Movie,
    pub in_library: bool,
    pub genre_labels: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeFeed {
    pub hero: Option<Movie>,
    pub weekly: Vec<Movie>,
    pub upcoming: Option<UpcomingPick>,
    pub genres: GenreCatalog,
    pub error: Option<String>,
}

impl HomeSources {
    /// Loads daily trends, weekly trends, upcoming releases and genres concurrently.
    pub async fn fetch(tmdb: &TmdbService) -> Self {
        let (daily, weekly, upcoming, genres) = tokio::join!(
            tmdb.trending_daily(),
            tmdb.trending_weekly(1),
            tmdb.upcoming(),
            tmdb.genres(),
        );

        let mut sources = HomeSources::default();
        sources.daily = sources.take_results("trending daily", daily);
        sources.weekly = sources.take_results("trending weekly", weekly);
        sources.upcoming = sources.take_results("upcoming", upcoming);
        sources.genres = match genres {
            Ok(genres) => genres,
            Err(e) => {
                sources.note_failure("genres", &e.to_string());
                GenreCatalog::default()
            }
        };
        sources
    }

    fn take_results(&mut self, feed: &str, outcome: Result<Paged<Movie>>) -> Vec<Movie> {
        match outcome {
            Ok(page) => page.results,
            Err(e) => {
                self.note_failure(feed, &e.to_string());
                Vec::new()
            }
        }
    }

    fn note_failure(&mut self, feed: &str, error: &str) {
        tracing::warn!(feed, error, "Home feed unavailable");
        self.error.get_or_insert_with(|| HOME_ERROR_MESSAGE.to_string());
    }

    /// Picks a random hero and upcoming release and the top weekly trends.
    pub fn assemble<R: Rng + ?Sized>(self, library: &LibraryService, rng: &mut R) -> HomeFeed {
        let hero = self.daily.choose(rng).cloned();
        let weekly = self.weekly.into_iter().take(WEEKLY_PICKS).collect();

        let upcoming = self.upcoming.choose(rng).map(|movie| UpcomingPick {
            in_library: library.contains(movie.id),
            genre_labels: movie.genre_labels(&self.genres, CARD_GENRES),
            movie: movie.clone(),
        });

        HomeFeed {
            hero,
            weekly,
            upcoming,
            genres: self.genres,
            error: self.error,
        }
    }
}
