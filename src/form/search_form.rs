//! Search form controller
//!
//! One controller instance owns one form's state for its whole lifetime.
//! State lives behind a mutex that is only held for synchronous
//! transitions, never across an await, so the single-outstanding-request
//! guard holds even under concurrent submits.

use std::sync::Mutex;
use std::time::Duration;

use crate::api::{AutocompleteClient, SearchClient, Suggestion, Throttle};
use crate::query::{self, SearchQuery};

use super::state::{SearchPhase, SearchState};

/// Form tuning knobs
#[derive(Debug, Clone)]
pub struct FormOptions {
    /// Minimum interval between autocomplete requests
    pub autocomplete_rate_limit: Duration,
    /// Ceiling on simultaneously selected works; a selection that would
    /// reach it is silently refused
    pub max_query_works: usize,
    /// Per-request timeout for both API clients
    pub request_timeout: Duration,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            autocomplete_rate_limit: Duration::from_millis(250),
            max_query_works: 200,
            request_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
struct FormInner {
    query: String,
    selections: Vec<Suggestion>,
    phase: SearchPhase,
    /// Search portion of the last adopted location; a navigation whose
    /// search portion matches is a no-op
    last_search: Option<String>,
    /// Locations pushed by submitted forms, newest last
    history: Vec<String>,
}

/// The search-state controller
pub struct SearchForm {
    search_client: SearchClient,
    autocomplete: AutocompleteClient,
    throttle: Throttle,
    max_query_works: usize,
    inner: Mutex<FormInner>,
}

impl SearchForm {
    /// Create a form against the given API origin with default options
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_options(base_url, FormOptions::default())
    }

    /// Create a form with custom options
    pub fn with_options(base_url: impl Into<String>, options: FormOptions) -> Self {
        let base_url = base_url.into();
        Self {
            search_client: SearchClient::with_timeout(base_url.clone(), options.request_timeout),
            autocomplete: AutocompleteClient::with_timeout(base_url, options.request_timeout),
            throttle: Throttle::new(options.autocomplete_rate_limit),
            max_query_works: options.max_query_works,
            inner: Mutex::new(FormInner {
                query: String::new(),
                selections: Vec::new(),
                phase: SearchPhase::Idle,
                last_search: None,
                history: Vec::new(),
            }),
        }
    }

    /// Flat view of the current state for rendering
    pub fn state(&self) -> SearchState {
        let inner = self.inner.lock().unwrap();
        SearchState {
            query: inner.query.clone(),
            selections: inner.selections.clone(),
            in_flight: inner.phase.is_searching(),
            results: inner.phase.results().map(|r| r.to_vec()),
            error: inner.phase.is_failed(),
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> SearchPhase {
        self.inner.lock().unwrap().phase.clone()
    }

    /// Locations pushed by submitted forms, oldest first
    pub fn history(&self) -> Vec<String> {
        self.inner.lock().unwrap().history.clone()
    }

    /// Free-text input changed. Updates the query text only; autocomplete
    /// is driven separately through [`load_options`](Self::load_options).
    pub fn input_changed(&self, text: &str) {
        self.inner.lock().unwrap().query = text.to_string();
    }

    /// Add a suggestion to the selection. Refused (returning `false`,
    /// leaving the selection untouched) when the new count would reach the
    /// configured maximum.
    pub fn select(&self, suggestion: Suggestion) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.selections.len() + 1 >= self.max_query_works {
            tracing::debug!(
                "selection refused: {} works already selected",
                inner.selections.len()
            );
            return false;
        }
        inner.selections.push(suggestion);
        true
    }

    /// Remove the first selection matching `value`. Returns whether
    /// anything was removed.
    pub fn deselect(&self, value: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        match inner.selections.iter().position(|s| s.value == value) {
            Some(idx) => {
                inner.selections.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Throttled autocomplete for the current input text.
    ///
    /// `None` means the call was superseded by a newer one — while waiting
    /// for a slot or while its response was in flight — and its result
    /// must be discarded. `Some(vec![])` covers short input and swallowed
    /// request failures.
    pub async fn load_options(&self, input: &str) -> Option<Vec<Suggestion>> {
        let ticket = self.throttle.admit().await?;
        let suggestions = self.autocomplete.suggest(input).await;
        if !self.throttle.is_current(&ticket) {
            tracing::debug!("discarding stale autocomplete response");
            return None;
        }
        Some(suggestions)
    }

    /// Form submitted: push the encoded location onto the history (the
    /// shareable link), then search. Returns the pushed location. The
    /// pushed location is recorded so a router echoing it back through
    /// [`navigate`](Self::navigate) does not double-submit.
    pub async fn submit_form(&self) -> String {
        let location = {
            let mut inner = self.inner.lock().unwrap();
            let query = SearchQuery::new(
                inner.query.clone(),
                inner.selections.iter().map(|s| s.value.clone()).collect(),
            );
            let encoded = query::encode(&query);
            let location = format!("/search/?{}", encoded);
            inner.history.push(location.clone());
            inner.last_search = Some(encoded);
            location
        };
        self.submit().await;
        location
    }

    /// Mount or URL change. Skips entirely when the location's search
    /// portion matches the last one adopted, so unrelated navigation and
    /// the router's echo of a just-pushed location stay quiet. Otherwise
    /// adopts the decoded query/selections and searches only when the
    /// decoded query is non-empty. Returns whether a search ran.
    pub async fn navigate(&self, location: &str) -> bool {
        let decoded = {
            let mut inner = self.inner.lock().unwrap();
            let search = search_portion(location);
            if inner.last_search.as_deref() == Some(search) {
                return false;
            }
            inner.last_search = Some(search.to_string());
            let decoded = query::decode(search);
            inner.query = decoded.text.clone();
            inner.selections = decoded
                .works
                .iter()
                .map(|work| Suggestion::from_name(work.clone()))
                .collect();
            decoded
        };

        if decoded.is_empty() {
            return false;
        }
        tracing::debug!("navigation adopted search: {:?}", decoded);
        self.submit().await;
        true
    }

    /// Execute a search for the current query/selections.
    ///
    /// No-op while a search is already in flight — duplicate concurrent
    /// submissions are dropped, never queued. Otherwise transitions to
    /// `Searching` (clearing any previous error or results), snapshots the
    /// query, and settles to `Success` or `Failed`.
    pub async fn submit(&self) {
        let snapshot = {
            let mut inner = self.inner.lock().unwrap();
            if inner.phase.is_searching() {
                tracing::debug!("submit dropped: a search is already in flight");
                return;
            }
            inner.phase = SearchPhase::Searching;
            SearchQuery::new(
                inner.query.clone(),
                inner.selections.iter().map(|s| s.value.clone()).collect(),
            )
        };

        let settled = match self.search_client.search(&snapshot).await {
            Ok(results) => {
                tracing::debug!("search settled with {} results", results.len());
                SearchPhase::Success(results)
            }
            Err(err) => {
                tracing::warn!("search failed: {}", err);
                SearchPhase::Failed
            }
        };
        self.inner.lock().unwrap().phase = settled;
    }
}

/// Everything after the first `?`, or empty when the location carries no
/// search string. The path alone never carries state.
fn search_portion(location: &str) -> &str {
    location
        .find('?')
        .map(|idx| &location[idx + 1..])
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SearchForm {
        SearchForm::new("http://127.0.0.1:1")
    }

    #[test]
    fn test_initial_state_is_idle() {
        let form = form();
        let state = form.state();
        assert!(!state.in_flight);
        assert!(!state.error);
        assert!(state.results.is_none());
        assert!(state.query.is_empty());
        assert!(state.selections.is_empty());
    }

    #[test]
    fn test_input_changed_updates_query_only() {
        let form = form();
        form.input_changed("giver");
        let state = form.state();
        assert_eq!(state.query, "giver");
        assert_eq!(form.phase(), SearchPhase::Idle);
    }

    #[test]
    fn test_select_and_deselect() {
        let form = form();
        assert!(form.select(Suggestion::from_name("The Giver")));
        assert!(form.select(Suggestion::from_name("Holes")));
        assert_eq!(form.state().selections.len(), 2);

        assert!(form.deselect("The Giver"));
        let selections = form.state().selections;
        assert_eq!(selections.len(), 1);
        assert_eq!(selections[0].value, "Holes");

        assert!(!form.deselect("not selected"));
    }

    #[test]
    fn test_selection_ceiling_refused() {
        let options = FormOptions {
            max_query_works: 3,
            ..FormOptions::default()
        };
        let form = SearchForm::with_options("http://127.0.0.1:1", options);
        assert!(form.select(Suggestion::from_name("a")));
        assert!(form.select(Suggestion::from_name("b")));
        // The third selection would reach the ceiling of 3.
        assert!(!form.select(Suggestion::from_name("c")));
        assert_eq!(form.state().selections.len(), 2);
    }

    #[tokio::test]
    async fn test_navigate_same_search_is_noop() {
        let form = form();
        // Empty search portion matches nothing yet, so the first call
        // adopts it; the second is the duplicate.
        assert!(!form.navigate("/").await);
        assert!(!form.navigate("/").await);
        assert_eq!(form.phase(), SearchPhase::Idle);
    }

    #[tokio::test]
    async fn test_navigate_empty_query_updates_without_search() {
        let form = form();
        form.input_changed("leftover");
        assert!(!form.navigate("/search/?utm_source=feed").await);
        let state = form.state();
        assert!(state.query.is_empty());
        assert!(state.results.is_none());
        assert_eq!(form.phase(), SearchPhase::Idle);
    }

    #[test]
    fn test_search_portion() {
        assert_eq!(search_portion("/search/?query=a"), "query=a");
        assert_eq!(search_portion("query=a"), "");
        assert_eq!(search_portion("/"), "");
    }
}
