mod brands;
mod catalog;
mod render;

use arise_storefront::SortKey;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "arise-cli")]
#[command(about = "Arise storefront preview")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render the product grid for a filter selection
    Render(RenderArgs),
    /// List catalog brands with product counts
    Brands {
        /// Catalog base URL or directory (overrides `ARISE_CATALOG_BASE`)
        #[arg(long)]
        base: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Catalog base URL or directory (overrides `ARISE_CATALOG_BASE`)
    #[arg(long)]
    base: Option<String>,
    /// Brand to check; repeatable
    #[arg(long = "brand")]
    brands: Vec<String>,
    /// Category to check (men, women, unisex); repeatable
    #[arg(long = "category")]
    categories: Vec<String>,
    /// Size to check; repeatable
    #[arg(long = "size")]
    sizes: Vec<String>,
    #[arg(long)]
    min_price: Option<u32>,
    #[arg(long)]
    max_price: Option<u32>,
    /// new, price-low (low-high) or price-high (high-low)
    #[arg(long)]
    sort: Option<SortKey>,
    /// Search text, applied as if submitted from the search box
    #[arg(long)]
    search: Option<String>,
    /// Page URL or path used for brand pre-selection, e.g. `/brands/nike.html?search=dunk`
    #[arg(long)]
    page: Option<String>,
    /// Page heading used for brand pre-selection, e.g. "Nike Collection"
    #[arg(long)]
    heading: Option<String>,
    /// Print the rendered view as JSON instead of markup
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = arise_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, base = %config.catalog_base, "configuration loaded");

    match cli.command {
        Commands::Render(args) => render::run_render(&config, args).await,
        Commands::Brands { base, json } => brands::run_brands(&config, base.as_deref(), json).await,
    }
}
