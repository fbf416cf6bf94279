//! The canonical in-memory product collection.

use std::collections::BTreeMap;
use std::sync::Arc;

use arise_core::{BrandTable, Category, PriceBounds, Product};
use futures::future::join_all;

use crate::client::CatalogClient;
use crate::normalize::normalize_document;
use crate::source::CatalogSource;

/// Read-only product collection shared by the filter, sort and render stages.
///
/// Cloning is cheap: the products live behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Arc<[Product]>,
}

impl ProductStore {
    /// Loads every source concurrently and concatenates the results in source
    /// order.
    ///
    /// A source that cannot be fetched or parsed contributes no products and
    /// is logged; the load itself always completes, possibly with an empty
    /// catalog.
    pub async fn load(
        client: &CatalogClient,
        sources: &[CatalogSource],
        brands: &BrandTable,
    ) -> Self {
        let batches = join_all(
            sources
                .iter()
                .map(|source| load_source(client, source, brands)),
        )
        .await;

        let products: Vec<Product> = batches.into_iter().flatten().collect();
        let store = Self::from_products(products);

        if store.is_empty() {
            tracing::error!(
                sources = sources.len(),
                "no products were loaded from any source"
            );
        } else {
            let by_category = store.category_counts();
            tracing::info!(
                total = store.len(),
                men = by_category.get(&Category::Men).copied().unwrap_or(0),
                women = by_category.get(&Category::Women).copied().unwrap_or(0),
                unisex = by_category.get(&Category::Unisex).copied().unwrap_or(0),
                "catalog loaded"
            );
        }

        store
    }

    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            products: products.into(),
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Shared handle to the underlying slice.
    #[must_use]
    pub fn shared(&self) -> Arc<[Product]> {
        Arc::clone(&self.products)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of products per canonical brand id, ordered by id.
    #[must_use]
    pub fn brand_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for product in self.products.iter() {
            *counts.entry(product.brand.clone()).or_insert(0) += 1;
        }
        counts
    }

    #[must_use]
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for product in self.products.iter() {
            *counts.entry(product.category).or_insert(0) += 1;
        }
        counts
    }

    /// Lowest and highest price in the catalog, or `None` when empty.
    #[must_use]
    pub fn price_bounds(&self) -> Option<PriceBounds> {
        let min = self.products.iter().map(|p| p.price).min()?;
        let max = self.products.iter().map(|p| p.price).max()?;
        Some(PriceBounds::new(min, max))
    }

    /// Every distinct size label, numeric labels first in numeric order.
    #[must_use]
    pub fn sizes(&self) -> Vec<String> {
        let mut sizes: Vec<String> = self
            .products
            .iter()
            .flat_map(|p| p.sizes.iter().cloned())
            .collect();
        sizes.sort_by(|a, b| match (a.parse::<f64>(), b.parse::<f64>()) {
            (Ok(x), Ok(y)) => x.total_cmp(&y),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        });
        sizes.dedup();
        sizes
    }
}

async fn load_source(
    client: &CatalogClient,
    source: &CatalogSource,
    brands: &BrandTable,
) -> Vec<Product> {
    tracing::debug!(source = %source.location, "fetching catalog document");
    match client.fetch_document(source).await {
        Ok(records) => {
            let products = normalize_document(records, &source.label, brands);
            tracing::info!(
                source = %source.location,
                label = %source.label,
                count = products.len(),
                "loaded products"
            );
            products
        }
        Err(e) => {
            tracing::warn!(
                source = %source.location,
                label = %source.label,
                error = %e,
                "failed to load catalog document, continuing without it"
            );
            Vec::new()
        }
    }
}
