//! Result presentation
//!
//! Pure construction of display rows from settled results, plus the static
//! panels shown around them. No control logic lives here.

mod result;

pub use result::{Link, ResultRow, Tooltip, TropeSpan};

use crate::form::SearchState;

/// Shown while nothing has been searched yet
pub const HOW_IT_WORKS: &str = "\
How it works

Finds books based on similar story features. For instance, The Giver might
match with books that share the tropes False Utopia, City in a Bottle, and
Cheerful Child, leading to recommendations like Brave New World and
Divergent, along with an explanation of what they have in common.

This contrasts with most recommendation and e-commerce sites, which instead
answer the question \"what was liked by people like you?\" The ability to
explain what is similar about the books is also lost that way.

Searching roughly 6000 books, all fiction, and mostly genre fiction.";

/// Attribution footer
pub const ABOUT: &str = "\
Powered by data from the community-driven wiki at https://tvtropes.org under
the CC BY-NC-SA license.";

/// Shown when the last search settled with an error
pub const SEARCH_ERROR: &str = "Something went wrong.";

/// Shown for a settled search with zero matches
pub const NO_RESULTS: &str = "No results found.";

/// Render a full form state as terminal text: result rows when a search
/// has settled, the how-it-works panel otherwise, with the error line on
/// top when the last search failed.
pub fn render_state(state: &SearchState) -> String {
    let mut out = String::new();
    if state.error {
        out.push_str(SEARCH_ERROR);
        out.push('\n');
    }
    match &state.results {
        Some(results) if results.is_empty() => {
            out.push_str(NO_RESULTS);
            out.push('\n');
        }
        Some(results) => {
            for (idx, item) in results.iter().enumerate() {
                let row = ResultRow::build(item, idx + 1);
                out.push_str(&row.to_text());
                out.push('\n');
            }
        }
        None => {
            out.push_str(HOW_IT_WORKS);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{SearchResultItem, Suggestion};

    fn state(results: Option<Vec<SearchResultItem>>, error: bool) -> SearchState {
        SearchState {
            query: String::new(),
            selections: Vec::<Suggestion>::new(),
            in_flight: false,
            results,
            error,
        }
    }

    #[test]
    fn test_no_search_shows_how_it_works() {
        let text = render_state(&state(None, false));
        assert!(text.contains("How it works"));
    }

    #[test]
    fn test_zero_matches_shows_no_results() {
        let text = render_state(&state(Some(vec![]), false));
        assert!(text.contains(NO_RESULTS));
        assert!(!text.contains("How it works"));
    }

    #[test]
    fn test_error_line_rendered() {
        let text = render_state(&state(None, true));
        assert!(text.starts_with(SEARCH_ERROR));
    }
}
