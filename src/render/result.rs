//! Result row construction
//!
//! Builds a presentation model from one result record and its 1-based
//! display index, then formats it as terminal text. Tooltip ids are unique
//! per page, derived from the display index and the trope's position.

use crate::api::SearchResultItem;

/// A labeled link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Tooltip attached to a trope label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    /// Locally unique id, `<displayIndex>_<tropeIndex>`
    pub id: String,
    pub text: String,
}

/// One shared trope within a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TropeSpan {
    pub link: Link,
    /// Present only when the trope has a non-empty description
    pub tooltip: Option<Tooltip>,
}

/// Presentation model for one result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// 1-based position in the result list
    pub index: usize,
    pub title: Link,
    pub creator: Option<Link>,
    pub genres: Vec<String>,
    pub tropes: Vec<TropeSpan>,
    /// `+N more` overflow label, present only when the server counted
    /// more shared tropes than it listed
    pub more_tropes: Option<String>,
}

impl ResultRow {
    /// Build a row from a result record and its 1-based display index
    pub fn build(item: &SearchResultItem, index: usize) -> Self {
        let tropes = item
            .tropes
            .iter()
            .enumerate()
            .map(|(trope_idx, trope)| {
                let tooltip = trope
                    .laconic_description
                    .as_deref()
                    .filter(|text| !text.is_empty())
                    .map(|text| Tooltip {
                        id: build_tooltip_id(index, trope_idx),
                        text: text.to_string(),
                    });
                TropeSpan {
                    link: Link {
                        label: trope.name.clone(),
                        url: trope.url.clone(),
                    },
                    tooltip,
                }
            })
            .collect();

        let more_tropes = if item.total_shared_tropes > item.tropes.len() {
            Some(format!("+{} more", item.total_shared_tropes))
        } else {
            None
        };

        Self {
            index,
            title: Link {
                label: item.name.clone(),
                url: item.url.clone(),
            },
            creator: item.creator.as_ref().map(|c| Link {
                label: c.name.clone(),
                url: c.url.clone(),
            }),
            genres: item.genres.clone(),
            tropes,
            more_tropes,
        }
    }

    /// Format the row as terminal text
    pub fn to_text(&self) -> String {
        let mut out = format!("{}. {} <{}>", self.index, self.title.label, self.title.url);
        if let Some(creator) = &self.creator {
            out.push_str(&format!(" by {} <{}>", creator.label, creator.url));
        }
        if !self.tropes.is_empty() || self.more_tropes.is_some() {
            out.push_str("\n   ");
            for (i, span) in self.tropes.iter().enumerate() {
                if i != 0 {
                    out.push_str(" · ");
                }
                out.push_str(&span.link.label);
                if let Some(tooltip) = &span.tooltip {
                    out.push_str(&format!(" ({})", tooltip.text));
                }
            }
            if let Some(more) = &self.more_tropes {
                if !self.tropes.is_empty() {
                    out.push(' ');
                }
                out.push_str(more);
            }
        }
        out
    }
}

fn build_tooltip_id(display_index: usize, trope_idx: usize) -> String {
    format!("{}_{}", display_index, trope_idx)
}
