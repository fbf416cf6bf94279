pub mod app_config;
pub mod brands;
pub mod config;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use brands::{
    brand_from_heading, brand_from_page_path, brand_from_title, load_brands, normalize_brand,
    BrandEntry, BrandTable, BrandsFile, UNKNOWN_BRAND,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{Category, PriceBounds, Product, DEFAULT_COLLECTION, DEFAULT_SIZES};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read brands file {path}: {source}")]
    BrandsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse brands file: {0}")]
    BrandsFileParse(#[from] serde_yaml::Error),

    #[error("config validation failed: {0}")]
    Validation(String),
}
