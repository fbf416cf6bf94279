pub mod client;
pub mod error;
pub mod normalize;
pub mod source;
pub mod store;
pub mod types;

mod retry;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use normalize::{normalize_document, normalize_product, parse_price};
pub use source::{default_sources, CatalogSource, SourceLocation, CATEGORY_DOCUMENTS};
pub use store::ProductStore;
pub use types::{parse_document, RawPrice, RawProduct, RawSize};
