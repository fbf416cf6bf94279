use std::path::PathBuf;

use crate::products::PriceBounds;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Base URL (`http(s)://`) or local directory holding the category
    /// `products.json` documents.
    pub catalog_base: String,
    pub log_level: String,
    /// Optional brand table override; the built-in table is used when unset.
    pub brands_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub price_bounds: PriceBounds,
    pub currency_symbol: String,
}
