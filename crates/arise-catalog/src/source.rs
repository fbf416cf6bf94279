//! Locations of the per-category catalog documents.

use std::fmt;
use std::path::PathBuf;

use reqwest::Url;

use crate::error::CatalogError;

/// `(label, relative path)` of every category document, in load order.
/// The men's directory is historically named `man`.
pub const CATEGORY_DOCUMENTS: [(&str, &str); 3] = [
    ("men", "man/products.json"),
    ("women", "women/products.json"),
    ("unisex", "unisex/products.json"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Http(Url),
    File(PathBuf),
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Http(url) => write!(f, "{url}"),
            SourceLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One document to load, tagged with a label used in logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSource {
    pub label: String,
    pub location: SourceLocation,
}

impl CatalogSource {
    #[must_use]
    pub fn new(label: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            label: label.into(),
            location,
        }
    }
}

/// Resolves the three category documents against `base`, which is either an
/// `http(s)://` URL or a local directory.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidBase`] if `base` looks like a URL but does
/// not parse, or is empty.
pub fn default_sources(base: &str) -> Result<Vec<CatalogSource>, CatalogError> {
    let base = base.trim();
    if base.is_empty() {
        return Err(CatalogError::InvalidBase {
            base: base.to_owned(),
            reason: "base must not be empty".into(),
        });
    }

    if base.starts_with("http://") || base.starts_with("https://") {
        // Url::join drops the last path segment unless it ends with '/'.
        let with_slash = if base.ends_with('/') {
            base.to_owned()
        } else {
            format!("{base}/")
        };
        let root = Url::parse(&with_slash).map_err(|e| CatalogError::InvalidBase {
            base: base.to_owned(),
            reason: e.to_string(),
        })?;
        CATEGORY_DOCUMENTS
            .iter()
            .map(|(label, rel)| {
                root.join(rel)
                    .map(|url| CatalogSource::new(*label, SourceLocation::Http(url)))
                    .map_err(|e| CatalogError::InvalidBase {
                        base: base.to_owned(),
                        reason: e.to_string(),
                    })
            })
            .collect()
    } else {
        let root = PathBuf::from(base);
        Ok(CATEGORY_DOCUMENTS
            .iter()
            .map(|(label, rel)| CatalogSource::new(*label, SourceLocation::File(root.join(rel))))
            .collect())
    }
}
