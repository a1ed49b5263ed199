//! Search lifecycle state
//!
//! The lifecycle is a tagged variant rather than independent
//! `searching`/`results`/`error` flags, so combinations like "in flight
//! with a stale error" cannot be represented at all.

use crate::api::{SearchResultItem, Suggestion};

/// Where the form is in its search lifecycle
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchPhase {
    /// Nothing searched yet; the how-it-works panel is shown
    #[default]
    Idle,
    /// One request outstanding; inputs are disabled
    Searching,
    /// Settled with the server's result list; empty means no matches
    Success(Vec<SearchResultItem>),
    /// Settled with a generic error; prior results are discarded
    Failed,
}

impl SearchPhase {
    /// True while a request is outstanding
    pub fn is_searching(&self) -> bool {
        matches!(self, SearchPhase::Searching)
    }

    /// True after a settle with an error
    pub fn is_failed(&self) -> bool {
        matches!(self, SearchPhase::Failed)
    }

    /// The settled result list, if any search has succeeded
    pub fn results(&self) -> Option<&[SearchResultItem]> {
        match self {
            SearchPhase::Success(results) => Some(results),
            _ => None,
        }
    }
}

/// Flat view of the form for rendering: current inputs plus the derived
/// `in_flight`/`results`/`error` fields. `results == None` means no search
/// has been performed yet.
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Current free-text input
    pub query: String,
    /// Currently selected works, in selection order
    pub selections: Vec<Suggestion>,
    /// A request is outstanding
    pub in_flight: bool,
    /// Settled results; `Some(vec![])` is a zero-match search
    pub results: Option<Vec<SearchResultItem>>,
    /// The last search settled with an error
    pub error: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phase_is_idle() {
        let phase = SearchPhase::default();
        assert_eq!(phase, SearchPhase::Idle);
        assert!(!phase.is_searching());
        assert!(!phase.is_failed());
        assert!(phase.results().is_none());
    }

    #[test]
    fn test_success_exposes_results() {
        let phase = SearchPhase::Success(Vec::new());
        assert_eq!(phase.results(), Some(&[][..]));
        assert!(!phase.is_failed());
    }

    #[test]
    fn test_failed_carries_no_results() {
        let phase = SearchPhase::Failed;
        assert!(phase.is_failed());
        assert!(phase.results().is_none());
    }
}
