//! Product filtering by brand, category, size and price.

use std::collections::BTreeSet;

use arise_core::{normalize_brand, Category, PriceBounds, Product};
use serde::Serialize;

/// Inclusive price window chosen in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl PriceRange {
    /// The window covering the whole slider, which filters nothing out.
    #[must_use]
    pub fn full(bounds: PriceBounds) -> Self {
        Self {
            min: bounds.floor,
            max: bounds.ceiling,
        }
    }

    #[must_use]
    pub fn contains(&self, price: u32) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::full(PriceBounds::default())
    }
}

/// The filter criteria of one pipeline run. Empty sets match everything.
///
/// Brands are stored in canonical form; use [`FilterSelection::with_brand`]
/// (or normalize before inserting) so that `"New Balance"` and `"newbalance"`
/// select the same products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub brands: BTreeSet<String>,
    pub categories: BTreeSet<Category>,
    pub sizes: BTreeSet<String>,
    pub price: PriceRange,
}

impl FilterSelection {
    /// A selection that lets every product inside `bounds` through.
    #[must_use]
    pub fn unfiltered(bounds: PriceBounds) -> Self {
        Self {
            price: PriceRange::full(bounds),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_brand(mut self, brand: &str) -> Self {
        let brand = normalize_brand(brand);
        if !brand.is_empty() {
            self.brands.insert(brand);
        }
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.insert(category);
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: &str) -> Self {
        let size = size.trim();
        if !size.is_empty() {
            self.sizes.insert(size.to_string());
        }
        self
    }

    #[must_use]
    pub fn with_price(mut self, min: u32, max: u32) -> Self {
        self.price = PriceRange { min, max };
        self
    }
}

/// Whether `product` satisfies every criterion of `selection`.
#[must_use]
pub fn matches(product: &Product, selection: &FilterSelection) -> bool {
    brand_matches(product, &selection.brands)
        && selection.price.contains(product.price)
        && size_matches(product, &selection.sizes)
        && category_matches(product.category, &selection.categories)
}

fn brand_matches(product: &Product, brands: &BTreeSet<String>) -> bool {
    brands.is_empty()
        || brands.contains(product.brand.as_str())
        || brands.contains(&normalize_brand(&product.brand))
}

fn size_matches(product: &Product, sizes: &BTreeSet<String>) -> bool {
    sizes.is_empty() || product.sizes.iter().any(|s| sizes.contains(s.as_str()))
}

// Unisex products are listed under both the men's and women's filters.
fn category_matches(category: Category, selected: &BTreeSet<Category>) -> bool {
    if selected.is_empty() || selected.contains(&category) {
        return true;
    }
    category == Category::Unisex
        && (selected.contains(&Category::Men) || selected.contains(&Category::Women))
}

/// Products matching `selection`, in catalog order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], selection: &FilterSelection) -> Vec<&'a Product> {
    products.iter().filter(|p| matches(p, selection)).collect()
}

/// Catalog indices of the products matching `selection`, ascending.
#[must_use]
pub fn filter_indices(products: &[Product], selection: &FilterSelection) -> Vec<usize> {
    products
        .iter()
        .enumerate()
        .filter(|(_, p)| matches(p, selection))
        .map(|(i, _)| i)
        .collect()
}

/// True when any checkbox is checked or the price window is narrower than
/// `bounds`.
#[must_use]
pub fn is_any_filter_active(selection: &FilterSelection, bounds: PriceBounds) -> bool {
    !selection.brands.is_empty()
        || !selection.categories.is_empty()
        || !selection.sizes.is_empty()
        || selection.price.min > bounds.floor
        || selection.price.max < bounds.ceiling
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
