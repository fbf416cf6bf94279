//! Normalization from raw document records to [`arise_core::Product`].

use arise_core::{BrandTable, Category, Product, DEFAULT_COLLECTION, DEFAULT_SIZES, UNKNOWN_BRAND};

use crate::error::CatalogError;
use crate::types::{RawPrice, RawProduct, RawSize};

/// Normalizes every record of one document, dropping (and logging) the ones
/// that fail validation. Never fails as a whole.
#[must_use]
pub fn normalize_document(
    records: Vec<serde_json::Value>,
    source: &str,
    brands: &BrandTable,
) -> Vec<Product> {
    let total = records.len();
    let products: Vec<Product> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let context = format!("#{index} in {source}");
            match decode_record(value, &context).and_then(|raw| normalize_product(raw, &context, brands)) {
                Ok(product) => Some(product),
                Err(e) => {
                    tracing::warn!(source, index, error = %e, "skipping invalid product record");
                    None
                }
            }
        })
        .collect();

    if products.len() < total {
        tracing::warn!(
            source,
            kept = products.len(),
            dropped = total - products.len(),
            "dropped invalid records"
        );
    }

    products
}

fn decode_record(value: serde_json::Value, context: &str) -> Result<RawProduct, CatalogError> {
    if !value.is_object() {
        return Err(CatalogError::InvalidRecord {
            context: context.to_owned(),
            reason: "not a JSON object".into(),
        });
    }
    serde_json::from_value(value).map_err(|e| CatalogError::InvalidRecord {
        context: context.to_owned(),
        reason: e.to_string(),
    })
}

/// Normalizes one raw record.
///
/// Missing `category` becomes `unisex`, missing `collection` becomes
/// `General`, and a missing or empty size list becomes the default sizes.
/// A missing brand is guessed from the product name, then `unknown`.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidRecord`] if `name`, `price` or `image` is
/// missing or empty, or if the price cannot be read as a non-negative integer.
pub fn normalize_product(
    raw: RawProduct,
    context: &str,
    brands: &BrandTable,
) -> Result<Product, CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidRecord {
        context: context.to_owned(),
        reason: reason.to_owned(),
    };

    let name = raw
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| invalid("missing name"))?;

    let image = raw
        .image
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .ok_or_else(|| invalid("missing image"))?;

    let price = match raw.price {
        Some(price) => parse_price(&price).map_err(|reason| invalid(&reason))?,
        None => return Err(invalid("missing price")),
    };

    let brand = raw
        .brand
        .as_deref()
        .map(|b| brands.normalize(b))
        .filter(|b| !b.is_empty())
        .or_else(|| brands.from_title(&name).map(str::to_owned))
        .unwrap_or_else(|| UNKNOWN_BRAND.to_string());

    let category = match raw.category.as_deref() {
        Some(label) => Category::parse(label).unwrap_or_else(|| {
            tracing::debug!(context, label, "unrecognized category, using unisex");
            Category::Unisex
        }),
        None => Category::Unisex,
    };

    let collection = raw
        .collection
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

    let sizes: Vec<String> = raw
        .sizes
        .unwrap_or_default()
        .into_iter()
        .map(RawSize::into_label)
        .filter(|s| !s.is_empty())
        .collect();
    let sizes = if sizes.is_empty() {
        DEFAULT_SIZES.iter().map(|s| (*s).to_string()).collect()
    } else {
        sizes
    };

    Ok(Product {
        name,
        brand,
        price,
        category,
        collection,
        sizes,
        image,
        is_new: raw.is_new.or(raw.new).unwrap_or(false),
    })
}

/// Coerces a raw price to whole currency units.
///
/// Numbers are truncated toward zero. Strings keep only their digits and
/// decimal point (`"₹2,499.50"` → `2499`); the fractional part is dropped.
///
/// # Errors
///
/// Returns a human-readable reason for negative, non-finite, digit-less or
/// out-of-range values.
pub fn parse_price(raw: &RawPrice) -> Result<u32, String> {
    match raw {
        RawPrice::Number(n) => {
            if let Some(v) = n.as_u64() {
                return u32::try_from(v).map_err(|_| format!("price {v} out of range"));
            }
            if n.as_i64().is_some() {
                return Err(format!("negative price {n}"));
            }
            match n.as_f64() {
                Some(v) if v.is_finite() && v >= 0.0 && v < f64::from(u32::MAX) => {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    Ok(v.trunc() as u32)
                }
                Some(v) if v < 0.0 => Err(format!("negative price {n}")),
                _ => Err(format!("price {n} out of range")),
            }
        }
        RawPrice::Text(s) => {
            let kept: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            let whole = kept.split('.').next().unwrap_or_default();
            if whole.is_empty() {
                return Err(format!("missing price (no digits in {s:?})"));
            }
            whole
                .parse::<u32>()
                .map_err(|_| format!("price {s:?} out of range"))
        }
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
