use serde::{Deserialize, Serialize};

/// Collection label applied when a raw record carries none.
pub const DEFAULT_COLLECTION: &str = "General";

/// Sizes offered when a raw record has no size list (or an empty one).
pub const DEFAULT_SIZES: [&str; 5] = ["7", "8", "9", "10", "11"];

/// Storefront department a product is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Men,
    Women,
    Unisex,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Men, Category::Women, Category::Unisex];

    /// Parses a category label as it appears in source documents and checkbox
    /// values. The men's source directory is named `man`, so that spelling is
    /// accepted as well.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "men" | "man" | "mens" => Some(Category::Men),
            "women" | "woman" | "womens" => Some(Category::Women),
            "unisex" => Some(Category::Unisex),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Men => "men",
            Category::Women => "women",
            Category::Unisex => "unisex",
        }
    }

    /// Title-cased label used on card tags, e.g. `"Unisex"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Men => "Men",
            Category::Women => "Women",
            Category::Unisex => "Unisex",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry after normalization. Immutable for the lifetime of a
/// loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Canonical lowercase brand id, e.g. `"newbalance"` or `"onitsuka tiger"`.
    pub brand: String,
    /// Whole display-currency units.
    pub price: u32,
    pub category: Category,
    pub collection: String,
    /// Size labels as listed by the source, never empty.
    pub sizes: Vec<String>,
    pub image: String,
    #[serde(rename = "isNew")]
    pub is_new: bool,
}

impl Product {
    #[must_use]
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }
}

/// Full range of the sidebar price slider. A selection spanning the whole
/// range does not count as an active price filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBounds {
    pub floor: u32,
    pub ceiling: u32,
}

impl PriceBounds {
    /// Builds bounds from two endpoints, swapping them if given in reverse.
    #[must_use]
    pub fn new(floor: u32, ceiling: u32) -> Self {
        if floor <= ceiling {
            Self { floor, ceiling }
        } else {
            Self {
                floor: ceiling,
                ceiling: floor,
            }
        }
    }

    #[must_use]
    pub fn contains(&self, price: u32) -> bool {
        (self.floor..=self.ceiling).contains(&price)
    }

    #[must_use]
    pub fn clamp(&self, price: u32) -> u32 {
        price.clamp(self.floor, self.ceiling)
    }

    /// Smallest bounds containing both `self` and `other`.
    #[must_use]
    pub fn union(self, other: PriceBounds) -> Self {
        Self {
            floor: self.floor.min(other.floor),
            ceiling: self.ceiling.max(other.ceiling),
        }
    }
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self {
            floor: 0,
            ceiling: 20_000,
        }
    }
}
