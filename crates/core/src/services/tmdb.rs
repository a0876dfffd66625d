use reqwest::{Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::RwLock;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{GenreCatalog, GenreList, Movie, Paged, VideoList};

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
const DEFAULT_LANGUAGE: &str = "en-US";

/// Thin client over the TMDB v3 REST API.
///
/// Every request carries the API key and language. There is no retry and no
/// caching: each call is a fresh round trip.
pub struct TmdbService {
    client: reqwest::Client,
    base_url: String,
    language: String,
    api_key: RwLock<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbErrorBody {
    status_message: Option<String>,
}

impl TmdbService {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, TMDB_BASE_URL, DEFAULT_LANGUAGE)
    }

    pub fn with_base_url(api_key: String, base_url: &str, language: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
            api_key: RwLock::new(api_key),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_base_url(
            config.tmdb_api_key.clone(),
            &config.tmdb_base_url,
            &config.tmdb_language,
        )
    }

    /// Update the API key at runtime (e.g., when settings are changed)
    pub fn set_api_key(&self, api_key: String) {
        if let Ok(mut key) = self.api_key.write() {
            *key = api_key;
        }
    }

    /// Get current API key
    fn get_api_key(&self) -> String {
        self.api_key.read().map(|k| k.clone()).unwrap_or_default()
    }

    /// Full request URL: `api_key` and `language` first, then the caller's params verbatim.
    pub fn build_url(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint))
            .map_err(|e| Error::Configuration(format!("invalid TMDB url: {}", e)))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.get_api_key());
            query.append_pair("language", &self.language);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Raw request returning the decoded JSON body.
    pub async fn request(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value> {
        self.get_json(endpoint, params).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = self.build_url(endpoint, params)?;
        tracing::debug!(endpoint, "TMDB request");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.json().await?)
    }

    pub async fn trending_daily(&self) -> Result<Paged<Movie>> {
        self.get_json("/trending/movie/day", &[]).await
    }

    pub async fn trending_weekly(&self, page: u32) -> Result<Paged<Movie>> {
        self.get_json("/trending/movie/week", &[("page", page.to_string())])
            .await
    }

    pub async fn upcoming(&self) -> Result<Paged<Movie>> {
        self.get_json("/movie/upcoming", &[]).await
    }

    /// Searches by title. An empty or missing year sends no year filter at all.
    pub async fn search_movies(
        &self,
        query: &str,
        page: u32,
        year: Option<&str>,
    ) -> Result<Paged<Movie>> {
        let mut params = vec![
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("include_adult", "false".to_string()),
        ];

        if let Some(y) = year.map(str::trim).filter(|y| !y.is_empty()) {
            params.push(("primary_release_year", y.to_string()));
        }

        self.get_json("/search/movie", &params).await
    }

    pub async fn movie_details(&self, tmdb_id: i64) -> Result<Movie> {
        self.get_json(&format!("/movie/{}", tmdb_id), &[]).await
    }

    pub async fn movie_videos(&self, tmdb_id: i64) -> Result<VideoList> {
        self.get_json(&format!("/movie/{}/videos", tmdb_id), &[])
            .await
    }

    pub async fn genres(&self) -> Result<GenreCatalog> {
        let list: GenreList = self.get_json("/genre/movie/list", &[]).await?;
        Ok(list.into())
    }

    /// Get full poster URL
    pub fn poster_url(path: &str, size: &str) -> String {
        format!("{}/{}{}", TMDB_IMAGE_BASE_URL, size, path)
    }
}

/// Prefers the API's own `status_message`; falls back to the status line.
async fn error_from_response(response: Response) -> Error {
    let status = response.status();
    let fallback = format!(
        "Error fetching data: {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    );

    let message = match response.json::<TmdbErrorBody>().await {
        Ok(TmdbErrorBody {
            status_message: Some(msg),
        }) if !msg.is_empty() => format!("TMDB API Error: {}", msg),
        _ => fallback.trim_end().to_string(),
    };

    tracing::warn!(status = status.as_u16(), %message, "TMDB request failed");
    Error::ExternalApi(message)
}
