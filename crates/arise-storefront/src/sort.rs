use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use arise_core::Product;
use serde::Serialize;

use crate::error::StorefrontError;

/// Order of the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// New arrivals first, then most expensive first.
    #[default]
    New,
    PriceLow,
    PriceHigh,
}

impl SortKey {
    /// Parses a sort dropdown value, falling back to [`SortKey::New`] for
    /// anything unrecognised.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::New => "new",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
        }
    }

    /// Ordering of two products under this key.
    #[must_use]
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::New => b
                .is_new
                .cmp(&a.is_new)
                .then_with(|| b.price.cmp(&a.price)),
            SortKey::PriceLow => a.price.cmp(&b.price),
            SortKey::PriceHigh => b.price.cmp(&a.price),
        }
    }
}

impl FromStr for SortKey {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" | "newest" => Ok(SortKey::New),
            "price-low" | "low-high" => Ok(SortKey::PriceLow),
            "price-high" | "high-low" => Ok(SortKey::PriceHigh),
            other => Err(StorefrontError::UnknownSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable in-place sort of product references.
pub fn sort_products(products: &mut [&Product], key: SortKey) {
    products.sort_by(|a, b| key.compare(a, b));
}

/// Stable in-place sort of catalog indices. Indices outside `catalog` keep
/// their relative position at the end.
pub fn sort_indices(indices: &mut [usize], catalog: &[Product], key: SortKey) {
    indices.sort_by(|&a, &b| match (catalog.get(a), catalog.get(b)) {
        (Some(pa), Some(pb)) => key.compare(pa, pb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use arise_core::Category;

    fn product(name: &str, price: u32, is_new: bool) -> Product {
        Product {
            name: name.to_string(),
            brand: "nike".to_string(),
            price,
            category: Category::Men,
            collection: "General".to_string(),
            sizes: vec!["9".to_string()],
            image: String::new(),
            is_new,
        }
    }

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn parses_both_spellings() {
        assert_eq!("low-high".parse::<SortKey>().unwrap(), SortKey::PriceLow);
        assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceLow);
        assert_eq!("high-low".parse::<SortKey>().unwrap(), SortKey::PriceHigh);
        assert_eq!(" Price-High ".parse::<SortKey>().unwrap(), SortKey::PriceHigh);
        assert_eq!("new".parse::<SortKey>().unwrap(), SortKey::New);
    }

    #[test]
    fn unknown_key_is_error_for_from_str_and_new_for_lenient() {
        assert!(matches!(
            "popular".parse::<SortKey>(),
            Err(StorefrontError::UnknownSortKey(k)) if k == "popular"
        ));
        assert_eq!(SortKey::parse_lenient("popular"), SortKey::New);
        assert_eq!(SortKey::parse_lenient(""), SortKey::New);
    }

    #[test]
    fn new_sort_puts_new_first_then_price_descending() {
        let (a, b, c, d) = (
            product("a", 100, false),
            product("b", 300, false),
            product("c", 50, true),
            product("d", 200, true),
        );
        let mut items = vec![&a, &b, &c, &d];
        sort_products(&mut items, SortKey::New);
        assert_eq!(names(&items), ["d", "c", "b", "a"]);
    }

    #[test]
    fn price_sorts_are_stable_for_ties() {
        let (a, b, c) = (
            product("a", 100, false),
            product("b", 100, true),
            product("c", 90, false),
        );
        let mut low = vec![&a, &b, &c];
        sort_products(&mut low, SortKey::PriceLow);
        assert_eq!(names(&low), ["c", "a", "b"]);

        let mut high = vec![&a, &b, &c];
        sort_products(&mut high, SortKey::PriceHigh);
        assert_eq!(names(&high), ["a", "b", "c"]);
    }

    #[test]
    fn sorting_twice_is_idempotent() {
        let catalog = vec![
            product("a", 100, true),
            product("b", 150, false),
            product("c", 80, true),
            product("d", 150, false),
        ];
        let mut once: Vec<usize> = (0..catalog.len()).collect();
        sort_indices(&mut once, &catalog, SortKey::New);
        let mut twice = once.clone();
        sort_indices(&mut twice, &catalog, SortKey::New);
        assert_eq!(once, vec![0, 2, 1, 3]);
        assert_eq!(once, twice);
    }

    #[test]
    fn out_of_range_indices_sink_to_the_end() {
        let catalog = vec![product("a", 100, false), product("b", 50, false)];
        let mut indices = vec![7, 0, 1];
        sort_indices(&mut indices, &catalog, SortKey::PriceLow);
        assert_eq!(indices, vec![1, 0, 7]);
    }

    #[test]
    fn display_uses_canonical_value() {
        assert_eq!(SortKey::PriceHigh.to_string(), "price-high");
        assert_eq!(SortKey::default(), SortKey::New);
    }
}
