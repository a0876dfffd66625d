pub mod catalog;
pub mod home;
pub mod library;
pub mod library_view;
pub mod modal;
pub mod settings;
pub mod tmdb;

pub use catalog::{CatalogController, CatalogRequest, FetchTicket, MovieSource, SearchQuery};
pub use home::{HomeFeed, HomeSources};
pub use library::LibraryService;
pub use library_view::{GenreSelection, LibraryBrowser, LoadMoreWindow, filter_by_genre};
pub use modal::{MovieDetail, Selection};
pub use settings::SettingsService;
pub use tmdb::TmdbService;
