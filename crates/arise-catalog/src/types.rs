//! Raw shapes of the static `products.json` documents.
//!
//! ## Observed shapes
//!
//! ### Document
//! Older category files are a bare JSON array of product objects. Newer ones
//! wrap the array: `{ "products": [ ... ] }`. Both are accepted.
//!
//! ### `price`
//! Usually a JSON number (`2499`), occasionally a display string with a
//! currency symbol and grouping (`"₹2,499"`). Normalization coerces both to an
//! integer.
//!
//! ### `sizes`
//! Mostly strings (`["7", "8", "9"]`) but hand-edited files contain bare
//! numbers (`[7, 8.5]`). Missing or empty lists fall back to the default sizes.
//!
//! ### New flag
//! Written as `isNew` in most files and as `new` in a few; either marks the
//! product as new.
//!
//! Records are decoded one at a time from [`serde_json::Value`] so a single
//! malformed entry cannot take the rest of its document down with it. Within
//! a record, a field of the wrong JSON type (`"isNew": "true"`, `"sizes":
//! "7,8,9"`, `"category": 5`) reads as absent and gets its default.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::CatalogError;

/// One raw product object. Every field is optional here; required-field
/// checks happen in [`crate::normalize`].
#[derive(Debug, Default, Deserialize)]
pub struct RawProduct {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<RawPrice>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub collection: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sizes: Option<Vec<RawSize>>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
    #[serde(default, rename = "isNew", deserialize_with = "lenient")]
    pub is_new: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub new: Option<bool>,
}

/// Reads an optional field, treating a value of the wrong type like a
/// missing one.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(decoded) => Ok(Some(decoded)),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring product field with unexpected type");
            Ok(None)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(serde_json::Number),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSize {
    Text(String),
    Number(serde_json::Number),
}

impl RawSize {
    #[must_use]
    pub fn into_label(self) -> String {
        match self {
            RawSize::Text(s) => s.trim().to_string(),
            RawSize::Number(n) => n.to_string(),
        }
    }
}

/// Splits a `products.json` body into its raw record values.
///
/// # Errors
///
/// - [`CatalogError::Deserialize`] if the body is not JSON.
/// - [`CatalogError::UnexpectedShape`] if it is JSON but neither accepted shape.
pub fn parse_document(body: &str, context: &str) -> Result<Vec<serde_json::Value>, CatalogError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| CatalogError::Deserialize {
            context: context.to_owned(),
            source: e,
        })?;

    match value {
        serde_json::Value::Array(items) => Ok(items),
        serde_json::Value::Object(mut map) => match map.remove("products") {
            Some(serde_json::Value::Array(items)) => Ok(items),
            _ => Err(CatalogError::UnexpectedShape {
                context: context.to_owned(),
            }),
        },
        _ => Err(CatalogError::UnexpectedShape {
            context: context.to_owned(),
        }),
    }
}
