use serde::{Deserialize, Serialize};

/// Largest page TMDB will serve, whatever `total_pages` claims.
pub const PAGE_CAP: u32 = 500;

/// A page of results from a paginated TMDB endpoint.
///
/// Missing `results` read as an empty list and a missing `total_pages` as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            page: 0,
            total_pages: 0,
            total_results: 0,
        }
    }
}

impl<T> Paged<T> {
    /// Highest page a caller may request.
    pub fn page_bound(&self) -> u32 {
        self.total_pages.min(PAGE_CAP)
    }
}
