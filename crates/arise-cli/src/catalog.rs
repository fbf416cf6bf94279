use arise_catalog::{default_sources, CatalogClient, ProductStore};
use arise_core::{load_brands, AppConfig, BrandTable};

/// Brand table from `ARISE_BRANDS_PATH`, or the built-in one.
pub(crate) fn load_brand_table(config: &AppConfig) -> anyhow::Result<BrandTable> {
    match &config.brands_path {
        Some(path) => {
            let table = load_brands(path)?;
            tracing::info!(
                path = %path.display(),
                brands = table.entries().len(),
                "loaded brand table"
            );
            Ok(table)
        }
        None => Ok(BrandTable::builtin()),
    }
}

/// Loads the catalog from `base_override` or the configured base.
pub(crate) async fn load_store(
    config: &AppConfig,
    base_override: Option<&str>,
    brands: &BrandTable,
) -> anyhow::Result<ProductStore> {
    let base = base_override.unwrap_or(&config.catalog_base);
    let client = CatalogClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
    )?;
    let sources = default_sources(base)?;
    tracing::info!(base, sources = sources.len(), "loading catalog");
    Ok(ProductStore::load(&client, &sources, brands).await)
}
