/// TMDB (The Movie Database) catalog client
///
/// API Flow:
/// 1. Search: /search/movie?query=... → first page of results
/// 2. Details: /movie/{id} → flat movie object with genres
///
/// Every request carries the server-held `api_key` as a query parameter.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    error::AppResult,
    models::{CatalogMovie, CatalogSearchPage, MovieDetails, MovieId},
    services::catalog::{MovieCatalog, MAX_SEARCH_RESULTS},
};

const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbClient {
    /// Creates a client whose requests give up after `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// GETs an endpoint and decodes the JSON body
    ///
    /// Any failure (transport, timeout, non-success status, bad body) is logged
    /// and reported as `None`.
    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> Option<T> {
        let url = format!("{}/{}", self.api_url, endpoint);

        let response = match self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, endpoint = %endpoint, "TMDB request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                status = %response.status(),
                endpoint = %endpoint,
                "TMDB returned non-success status"
            );
            return None;
        }

        match response.json::<T>().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(error = %e, endpoint = %endpoint, "Failed to parse TMDB response");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbClient {
    async fn search(&self, query: &str) -> Vec<CatalogMovie> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let page: Option<CatalogSearchPage> = self
            .fetch(
                "search/movie",
                &[
                    ("query", query),
                    ("page", "1"),
                    ("include_adult", "false"),
                    ("language", LANGUAGE),
                ],
            )
            .await;

        let mut results = page.map(|p| p.results).unwrap_or_default();
        results.truncate(MAX_SEARCH_RESULTS);

        tracing::info!(
            query = %query,
            results = results.len(),
            catalog = self.name(),
            "Movie search completed"
        );

        results
    }

    async fn get_movie(&self, id: MovieId) -> Option<MovieDetails> {
        let details: Option<MovieDetails> = self
            .fetch(&format!("movie/{}", id), &[("language", LANGUAGE)])
            .await;

        tracing::debug!(movie_id = id, found = details.is_some(), "Movie lookup completed");

        details
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
