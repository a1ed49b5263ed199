//! Search query model and URL query-string codec
//!
//! A search is linkable: the query text and the selected works round-trip
//! through the `/search/?query=...&works=...` location string.

mod codec;

pub use codec::{decode, encode};

use serde::{Deserialize, Serialize};

/// A search request: free text plus the selected work titles, in selection
/// order. Immutable once a search begins executing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query
    pub text: String,
    /// Selected work titles, selection order preserved
    pub works: Vec<String>,
}

impl SearchQuery {
    /// Create a query from text and selected work titles
    pub fn new(text: impl Into<String>, works: Vec<String>) -> Self {
        Self {
            text: text.into(),
            works,
        }
    }

    /// True when neither text nor works are present. An empty query is
    /// never submitted on navigation.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.works.is_empty()
    }
}
