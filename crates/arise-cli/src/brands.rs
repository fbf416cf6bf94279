use arise_core::AppConfig;
use serde_json::json;

use crate::catalog::{load_brand_table, load_store};

pub(crate) async fn run_brands(
    config: &AppConfig,
    base: Option<&str>,
    as_json: bool,
) -> anyhow::Result<()> {
    let brands = load_brand_table(config)?;
    let store = load_store(config, base, &brands).await?;
    let counts = store.brand_counts();

    if as_json {
        let rows: Vec<_> = counts
            .iter()
            .map(|(id, count)| {
                json!({
                    "id": id,
                    "name": brands.display_name(id).unwrap_or(id),
                    "products": count,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if counts.is_empty() {
        println!("no products loaded");
        return Ok(());
    }
    for (id, count) in &counts {
        let name = brands.display_name(id).unwrap_or(id);
        println!("{name:<20} {id:<20} {count:>5}");
    }
    if let Some(bounds) = store.price_bounds() {
        println!(
            "{} products, prices {}..{}",
            store.len(),
            bounds.floor,
            bounds.ceiling
        );
    }
    Ok(())
}
