use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Brand id assigned when neither the record nor its title names a brand.
pub const UNKNOWN_BRAND: &str = "unknown";

/// One row of the brand normalization table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandEntry {
    /// Canonical lowercase id stored on products and used as checkbox value.
    pub id: String,
    /// Display name, e.g. `"New Balance"`.
    pub name: String,
    /// Extra spellings that normalize to `id`.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Substrings searched for in product titles when a record has no brand.
    #[serde(default)]
    pub title_keywords: Vec<String>,
}

impl BrandEntry {
    fn new(id: &str, name: &str, aliases: &[&str], title_keywords: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            aliases: aliases.iter().map(|a| (*a).to_string()).collect(),
            title_keywords: title_keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    /// URL-safe slug of the display name, matching the brand page file name
    /// (`"New Balance"` → `"new-balance"`).
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id.as_str())
            .chain(std::iter::once(self.name.as_str()))
            .chain(self.aliases.iter().map(String::as_str))
    }
}

#[derive(Debug, Deserialize)]
pub struct BrandsFile {
    pub brands: Vec<BrandEntry>,
}

/// Brand normalization table. Lookup compares spellings case-insensitively
/// with `-`/`_` treated as spaces and runs of whitespace collapsed.
#[derive(Debug, Clone)]
pub struct BrandTable {
    entries: Vec<BrandEntry>,
}

static BUILTIN: LazyLock<BrandTable> = LazyLock::new(BrandTable::builtin);

impl BrandTable {
    /// The storefront's stock brands. Order matters for title guessing: the
    /// first entry whose keyword appears in a title wins.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                BrandEntry::new("nike", "Nike", &[], &["nike"]),
                BrandEntry::new("adidas", "Adidas", &[], &["adidas"]),
                BrandEntry::new("puma", "Puma", &[], &["puma"]),
                BrandEntry::new("reebok", "Reebok", &[], &["reebok"]),
                BrandEntry::new("asics", "Asics", &[], &["asics"]),
                BrandEntry::new("converse", "Converse", &[], &["converse"]),
                BrandEntry::new("newbalance", "New Balance", &[], &["new balance"]),
                BrandEntry::new("jordan", "Jordan", &["Air Jordan"], &["jordan"]),
                BrandEntry::new(
                    "onitsuka tiger",
                    "Onitsuka Tiger",
                    &["onitsuka"],
                    &["onitsuka"],
                ),
            ],
        }
    }

    /// Builds a table from a parsed brands file after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for empty ids or names, non-canonical
    /// ids, or spellings claimed by more than one brand.
    pub fn from_file(file: BrandsFile) -> Result<Self, ConfigError> {
        validate_brands(&file)?;
        Ok(Self {
            entries: file.brands,
        })
    }

    #[must_use]
    pub fn entries(&self) -> &[BrandEntry] {
        &self.entries
    }

    /// Maps a free-form brand spelling to its canonical id. Unknown brands
    /// come back lowercased and whitespace-collapsed, so the mapping is
    /// idempotent for every input.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let cleaned = clean(raw);
        if cleaned.is_empty() {
            return cleaned;
        }
        let key = comparison_key(&cleaned);
        self.entries
            .iter()
            .find(|entry| entry.spellings().any(|s| comparison_key(s) == key))
            .map_or(cleaned, |entry| entry.id.clone())
    }

    /// Guesses a brand id from a product title using each entry's keywords.
    #[must_use]
    pub fn from_title(&self, title: &str) -> Option<&str> {
        let title = title.to_lowercase();
        self.entries
            .iter()
            .find(|entry| {
                entry
                    .title_keywords
                    .iter()
                    .any(|k| !k.is_empty() && title.contains(&k.to_lowercase()))
            })
            .map(|entry| entry.id.as_str())
    }

    /// Display name for a canonical id, falling back to `None` for brands
    /// outside the table.
    #[must_use]
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.name.as_str())
    }

    /// Detects the brand of a brand landing page from its URL path, e.g.
    /// `/brands/new-balance.html` → `newbalance`. Only paths with a `brands`
    /// directory segment naming a known brand qualify.
    #[must_use]
    pub fn from_page_path(&self, path: &str) -> Option<String> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        segments.by_ref().find(|s| s.eq_ignore_ascii_case("brands"))?;
        let file = segments.next()?;
        let slug = file.strip_suffix(".html").unwrap_or(file).to_lowercase();
        if slug.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.slug() == slug || entry.spellings().any(|s| clean(s) == slug))
            .map(|entry| entry.id.clone())
            .or_else(|| {
                let normalized = self.normalize(&slug);
                self.entries
                    .iter()
                    .any(|entry| entry.id == normalized)
                    .then_some(normalized)
            })
    }

    /// Detects a brand from a page heading of the form `"<Brand> Collection"`.
    /// Leading words that are not part of a known brand ("Shop the Nike
    /// Collection") are skipped.
    #[must_use]
    pub fn from_heading(&self, heading: &str) -> Option<String> {
        let lower = heading.to_ascii_lowercase();
        let idx = lower.find(" collection")?;
        let prefix = &heading[..idx];
        let start = prefix
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_alphabetic() || *c == '-' || *c == ' ')
            .last()
            .map(|(i, _)| i)?;
        let words: Vec<&str> = prefix[start..].split_whitespace().collect();
        if words.is_empty() {
            return None;
        }
        let known = (0..words.len()).find_map(|i| {
            let candidate = self.normalize(&words[i..].join(" "));
            self.entries
                .iter()
                .any(|entry| entry.id == candidate)
                .then_some(candidate)
        });
        Some(known.unwrap_or_else(|| self.normalize(&words.join(" "))))
    }
}

impl Default for BrandTable {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

/// [`BrandTable::normalize`] against the built-in table.
#[must_use]
pub fn normalize_brand(raw: &str) -> String {
    BUILTIN.normalize(raw)
}

/// [`BrandTable::from_title`] against the built-in table.
#[must_use]
pub fn brand_from_title(title: &str) -> Option<&'static str> {
    BUILTIN.from_title(title)
}

/// [`BrandTable::from_page_path`] against the built-in table.
#[must_use]
pub fn brand_from_page_path(path: &str) -> Option<String> {
    BUILTIN.from_page_path(path)
}

/// [`BrandTable::from_heading`] against the built-in table.
#[must_use]
pub fn brand_from_heading(heading: &str) -> Option<String> {
    BUILTIN.from_heading(heading)
}

/// Load and validate a brand table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_brands(path: &Path) -> Result<BrandTable, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BrandsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let brands_file: BrandsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::BrandsFileParse)?;

    BrandTable::from_file(brands_file)
}

fn validate_brands(brands_file: &BrandsFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();
    let mut seen_spellings = HashSet::new();

    for brand in &brands_file.brands {
        if brand.id.trim().is_empty() || brand.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "brand id and name must be non-empty".to_string(),
            ));
        }

        if clean(&brand.id) != brand.id {
            return Err(ConfigError::Validation(format!(
                "brand id '{}' must be lowercase with single spaces",
                brand.id
            )));
        }

        if !seen_ids.insert(brand.id.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand id: '{}'",
                brand.id
            )));
        }

        // A spelling repeated within one entry is harmless; across entries it
        // would make normalization order-dependent.
        let own: HashSet<String> = brand.spellings().map(comparison_key).collect();
        for key in own {
            if !seen_spellings.insert(key.clone()) {
                return Err(ConfigError::Validation(format!(
                    "spelling '{key}' of brand '{}' is already claimed by another brand",
                    brand.id
                )));
            }
        }
    }

    Ok(())
}

fn clean(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn comparison_key(raw: &str) -> String {
    clean(&raw.replace(['-', '_'], " "))
}

#[cfg(test)]
#[path = "brands_test.rs"]
mod tests;
