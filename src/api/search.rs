//! Search API client
//!
//! Fetches works similar to the queried set. The server owns ranking and
//! result shaping; the client returns the result list verbatim or a single
//! [`ApiError`](super::ApiError), with no retries and no partial results.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::query::SearchQuery;

/// A work's creator, linked to its detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub name: String,
    pub url: String,
}

/// A narrative trope shared with the queried works
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trope {
    pub name: String,
    pub url: String,
    /// Short description for tooltips; the server sends an empty string
    /// when none exists
    #[serde(default)]
    pub laconic_description: Option<String>,
}

/// One recommended work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub name: String,
    pub url: String,
    /// Absent for works without a recorded creator
    #[serde(default)]
    pub creator: Option<Creator>,
    #[serde(default)]
    pub genres: Vec<String>,
    /// The highest-weight shared tropes; may be a truncated list
    #[serde(default)]
    pub tropes: Vec<Trope>,
    /// Full shared-trope count, >= `tropes.len()`
    pub total_shared_tropes: usize,
}

/// Wire shape of the search endpoint response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResultItem>,
}

/// Client for the search endpoint
pub struct SearchClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl SearchClient {
    /// Create a new client against the given API origin
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(10))
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Execute a search. The query text rides the `query` parameter and
    /// each selected work a repeated `works` parameter, mirroring the
    /// location-string encoding.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResultItem>, ApiError> {
        let url = format!("{}/api/search/", self.base_url);

        let mut params: Vec<(&str, &str)> = vec![("query", query.text.as_str())];
        for work in &query.works {
            params.push(("works", work.as_str()));
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("search returned status {}", status);
            return Err(ApiError::Status(status.as_u16()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(body.results)
    }

    /// Get the API origin
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
