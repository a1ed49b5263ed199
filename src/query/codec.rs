//! Location string encoding and decoding
//!
//! Serializes a [`SearchQuery`] into `application/x-www-form-urlencoded`
//! form and back. Multi-valued keys use the repeated-key form
//! (`works=A&works=B`), never comma-joining or bracket syntax, so the
//! strings stay compatible with the server's `getlist`-style parsing.

use url::form_urlencoded;

use super::SearchQuery;

/// Encode a query as a location search string (no leading `?`).
///
/// `query=<text>` is emitted only when the text is non-empty, followed by
/// one `works=<title>` pair per selected work in selection order.
pub fn encode(query: &SearchQuery) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if !query.text.is_empty() {
        serializer.append_pair("query", &query.text);
    }
    for work in &query.works {
        serializer.append_pair("works", work);
    }
    serializer.finish()
}

/// Decode a location search string into a query.
///
/// Accepts a bare `query=...&works=...` string, a leading `?`, or a full
/// `/search/?...` location. `+` decodes as a space. Repeated `works` keys
/// accumulate in order; a repeated `query` key keeps its first occurrence.
/// Absent keys simply leave their field empty, which reads as "no search
/// requested" rather than an error.
pub fn decode(raw: &str) -> SearchQuery {
    let raw = match raw.find('?') {
        Some(idx) => &raw[idx + 1..],
        None => raw,
    };

    let mut text: Option<String> = None;
    let mut works = Vec::new();
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        match key.as_ref() {
            "query" => {
                if text.is_none() {
                    text = Some(value.into_owned());
                }
            }
            "works" => {
                // An empty value reads as "no work", not an empty title.
                if !value.is_empty() {
                    works.push(value.into_owned());
                }
            }
            _ => {}
        }
    }

    SearchQuery {
        text: text.unwrap_or_default(),
        works,
    }
}
