//! Autocomplete API client
//!
//! Fetches candidate work titles for partial input. Autocomplete must never
//! block or crash the input field, so every failure collapses to an empty
//! suggestion list.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Inputs shorter than this never hit the network; 0-1 character queries
/// are too noisy to be useful.
const MIN_INPUT_CHARS: usize = 2;

/// A candidate work title. Label and value are both the title; the pair
/// shape matches what selection widgets consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Display label
    pub label: String,
    /// Selection value
    pub value: String,
}

impl Suggestion {
    /// Create a suggestion from a work title
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            value: name,
        }
    }
}

/// Wire shape of the suggestion endpoint response
#[derive(Debug, Deserialize)]
struct SuggestionsResponse {
    suggestions: Vec<SuggestionRecord>,
}

#[derive(Debug, Deserialize)]
struct SuggestionRecord {
    name: String,
}

/// Client for the autocomplete endpoint
pub struct AutocompleteClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl AutocompleteClient {
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

    /// Fetch suggestions for partial input text.
    ///
    /// Resolves to an empty list for short input (without a network call)
    /// and for any transport, status, or parse failure.
    pub async fn suggest(&self, input: &str) -> Vec<Suggestion> {
        if input.chars().count() < MIN_INPUT_CHARS {
            return Vec::new();
        }

        match self.fetch(input).await {
            Ok(suggestions) => suggestions,
            Err(err) => {
                tracing::debug!("autocomplete request failed: {}", err);
                Vec::new()
            }
        }
    }

    async fn fetch(&self, input: &str) -> Result<Vec<Suggestion>, super::ApiError> {
        let url = format!("{}/api/autocomplete/", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("query", input)])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(super::ApiError::Status(status.as_u16()));
        }

        let body: SuggestionsResponse = response
            .json()
            .await
            .map_err(|e| super::ApiError::Parse(e.to_string()))?;

        Ok(body
            .suggestions
            .into_iter()
            .map(|record| Suggestion::from_name(record.name))
            .collect())
    }

    /// Get the API origin
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_from_name() {
        let suggestion = Suggestion::from_name("The Giver");
        assert_eq!(suggestion.label, "The Giver");
        assert_eq!(suggestion.value, "The Giver");
    }

    #[test]
    fn test_client_base_url() {
        let client = AutocompleteClient::new("http://localhost:8000");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_short_input_resolves_empty() {
        // Point at a closed port: if a request were issued it would error,
        // but short input must short-circuit before the network.
        let client = AutocompleteClient::new("http://127.0.0.1:1");
        assert!(client.suggest("").await.is_empty());
        assert!(client.suggest("g").await.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_resolves_empty() {
        let client =
            AutocompleteClient::with_timeout("http://127.0.0.1:1", Duration::from_millis(200));
        assert!(client.suggest("giver").await.is_empty());
    }
}
