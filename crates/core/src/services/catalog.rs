use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Movie, PAGE_CAP, Paged};
use crate::services::TmdbService;

pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch movies. Please check your network.";
pub const NO_RESULTS_MESSAGE: &str =
    "OOPS... We are very sorry! We don't have any results due to your search.";
pub const FAILED_RESULTS_MESSAGE: &str = "No results due to error.";

const PAGE_BUTTONS: u32 = 5;
const YEAR_OPTIONS: i32 = 50;

/// Search input: `text` is the title query, `year` an optional release year ("" for none).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub year: String,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            year: year.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn year_filter(&self) -> Option<String> {
        let year = self.year.trim();
        (!year.is_empty()).then(|| year.to_string())
    }
}

/// The upstream call a fetch resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogRequest {
    TrendingWeekly {
        page: u32,
    },
    Search {
        query: String,
        page: u32,
        year: Option<String>,
    },
}

/// Issued when a fetch starts; hand it back to `complete` with the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub request: CatalogRequest,
}

/// Anything that can answer a catalog page request.
pub trait MovieSource {
    fn fetch_page(
        &self,
        request: &CatalogRequest,
    ) -> impl Future<Output = Result<Paged<Movie>>> + Send;
}

impl MovieSource for TmdbService {
    async fn fetch_page(&self, request: &CatalogRequest) -> Result<Paged<Movie>> {
        match request {
            CatalogRequest::TrendingWeekly { page } => self.trending_weekly(*page).await,
            CatalogRequest::Search { query, page, year } => {
                self.search_movies(query, *page, year.as_deref()).await
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum ListStatus {
    Loading,
    Ready,
    NoResults(&'static str),
    Failed(&'static str),
}

/// Numbered buttons for the pagination bar.
///
/// `first`/`last` are set when the jump-to-edge button (followed or preceded
/// by an ellipsis) should be shown; `prev`/`next` are `None` when disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub pages: Vec<u32>,
    pub first: Option<u32>,
    pub last: Option<u32>,
    pub prev: Option<u32>,
    pub next: Option<u32>,
}

/// Up to five page buttons centred on `current`, `None` when there is at most one page.
pub fn page_window(current: u32, total: u32) -> Option<PageWindow> {
    if total <= 1 {
        return None;
    }

    let centred = current.saturating_sub(PAGE_BUTTONS / 2).max(1);
    let end = centred.saturating_add(PAGE_BUTTONS - 1).min(total);
    let start = end.saturating_sub(PAGE_BUTTONS - 1).max(1);

    Some(PageWindow {
        pages: (start..=end).collect(),
        first: (start > 1).then_some(1),
        last: (end < total).then_some(total),
        prev: (current > 1).then(|| current - 1),
        next: (current < total).then(|| current + 1),
    })
}

/// Release years offered by the year picker, newest first.
pub fn year_options(current_year: i32) -> Vec<i32> {
    (0..YEAR_OPTIONS).map(|i| current_year - i).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSnapshot {
    pub draft: SearchQuery,
    pub committed: SearchQuery,
    pub page: u32,
    pub total_pages: u32,
    pub page_bound: u32,
    pub results: Vec<Movie>,
    pub loading: bool,
    pub error: Option<String>,
    pub status: ListStatus,
    pub pagination: Option<PageWindow>,
}

/// Search and pagination state for the catalog screen.
///
/// Draft input is kept apart from the committed query; only `submit` and
/// `clear` move it across. Every state change that needs data returns a
/// [`FetchTicket`]. Tickets carry a sequence number and only the most recently
/// issued one is applied, so a slow response can never overwrite a newer one.
#[derive(Debug, Clone)]
pub struct CatalogController {
    draft: SearchQuery,
    committed: SearchQuery,
    page: u32,
    total_pages: u32,
    results: Vec<Movie>,
    loading: bool,
    error: Option<String>,
    issued: u64,
}

impl Default for CatalogController {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogController {
    pub fn new() -> Self {
        Self {
            draft: SearchQuery::default(),
            committed: SearchQuery::default(),
            page: 1,
            total_pages: 0,
            results: Vec::new(),
            loading: false,
            error: None,
            issued: 0,
        }
    }

    pub fn draft(&self) -> &SearchQuery {
        &self.draft
    }

    pub fn committed(&self) -> &SearchQuery {
        &self.committed
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn results(&self) -> &[Movie] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True until the first fetch has been issued.
    pub fn is_fresh(&self) -> bool {
        self.issued == 0
    }

    pub fn set_draft(&mut self, draft: SearchQuery) {
        self.draft = draft;
    }

    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    pub fn set_draft_year(&mut self, year: impl Into<String>) {
        self.draft.year = year.into();
    }

    /// Commits the draft and goes back to page 1, even if the text is unchanged.
    pub fn submit(&mut self) -> FetchTicket {
        self.committed = self.draft.clone();
        self.page = 1;
        self.begin_fetch()
    }

    /// Empties both queries and returns to page 1 of the weekly trends.
    pub fn clear(&mut self) -> FetchTicket {
        self.draft = SearchQuery::default();
        self.committed = SearchQuery::default();
        self.page = 1;
        self.begin_fetch()
    }

    /// Stores the page as given; keeping it within `page_bound` is the caller's job.
    pub fn set_page(&mut self, page: u32) -> FetchTicket {
        self.page = page;
        self.begin_fetch()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        self.error = None;

        FetchTicket {
            seq: self.issued,
            request: self.current_request(),
        }
    }

    pub fn current_request(&self) -> CatalogRequest {
        if self.committed.is_blank() {
            CatalogRequest::TrendingWeekly { page: self.page }
        } else {
            CatalogRequest::Search {
                query: self.committed.text.clone(),
                page: self.page,
                year: self.committed.year_filter(),
            }
        }
    }

    /// Applies a fetch outcome. Returns `false` when the ticket was superseded.
    pub fn complete(&mut self, ticket: FetchTicket, outcome: Result<Paged<Movie>>) -> bool {
        if ticket.seq != self.issued {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.issued,
                "Dropping stale catalog response"
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(page) => {
                self.results = page.results;
                self.total_pages = page.total_pages;
            }
            Err(e) => {
                tracing::warn!(error = %e, request = ?ticket.request, "Catalog fetch failed");
                self.results.clear();
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    /// Runs the ticket's request against `source` and applies the result.
    pub async fn execute<S: MovieSource>(&mut self, ticket: FetchTicket, source: &S) -> bool {
        let outcome = source.fetch_page(&ticket.request).await;
        self.complete(ticket, outcome)
    }

    /// Highest selectable page: TMDB refuses anything past 500.
    pub fn page_bound(&self) -> u32 {
        self.total_pages.min(PAGE_CAP)
    }

    pub fn is_selectable(&self, page: u32) -> bool {
        (1..=self.page_bound()).contains(&page)
    }

    pub fn list_status(&self) -> ListStatus {
        if self.loading {
            ListStatus::Loading
        } else if !self.results.is_empty() {
            ListStatus::Ready
        } else if self.error.is_some() {
            ListStatus::Failed(FAILED_RESULTS_MESSAGE)
        } else {
            ListStatus::NoResults(NO_RESULTS_MESSAGE)
        }
    }

    /// Pagination bar, shown only while there are results to page through.
    pub fn page_window(&self) -> Option<PageWindow> {
        if self.results.is_empty() {
            return None;
        }
        page_window(self.page, self.page_bound())
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            draft: self.draft.clone(),
            committed: self.committed.clone(),
            page: self.page,
            total_pages: self.total_pages,
            page_bound: self.page_bound(),
            results: self.results.clone(),
            loading: self.loading,
            error: self.error.clone(),
            status: self.list_status(),
            pagination: self.page_window(),
        }
    }
}
