//! Free-text search over the currently displayed products.

use arise_core::Product;

/// Queries shorter than this (after trimming) are not applied.
pub const MIN_QUERY_CHARS: usize = 2;

/// A trimmed, lowercased search term of at least [`MIN_QUERY_CHARS`]
/// characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    needle: String,
}

impl SearchQuery {
    /// A query typed into the search box. Returns `None` for blank or
    /// too-short input.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let raw = input.trim();
        if raw.chars().count() < MIN_QUERY_CHARS {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            needle: raw.to_lowercase(),
        })
    }

    /// A query entered with an explicit submit. Any non-blank input counts,
    /// including a single character.
    #[must_use]
    pub fn submitted(input: &str) -> Option<Self> {
        let raw = input.trim();
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            needle: raw.to_lowercase(),
        })
    }

    /// The query as typed, minus surrounding whitespace.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Case-insensitive substring match on name, brand, category or
    /// collection.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        [
            product.name.as_str(),
            product.brand.as_str(),
            product.category.as_str(),
            product.collection.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&self.needle))
    }
}
