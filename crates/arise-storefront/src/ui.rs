//! The storefront controller: sidebar controls, page context and the
//! filter → sort → search → render pipeline.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use arise_core::{AppConfig, BrandTable, Category, PriceBounds, Product};
use serde::Serialize;
use url::Url;

use crate::error::StorefrontError;
use crate::filter::{filter_indices, is_any_filter_active, FilterSelection, PriceRange};
use crate::quick_view::QuickView;
use crate::render::{GridRenderer, RenderedGrid};
use crate::search::SearchQuery;
use crate::sort::{sort_indices, SortKey};

/// Sidebar checkbox groups, named as in the page markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxGroup {
    Brand,
    Category,
    Size,
}

impl CheckboxGroup {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CheckboxGroup::Brand => "brand",
            CheckboxGroup::Category => "category",
            CheckboxGroup::Size => "size",
        }
    }
}

impl FromStr for CheckboxGroup {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brand" | "brands" => Ok(CheckboxGroup::Brand),
            "category" | "categories" => Ok(CheckboxGroup::Category),
            "size" | "sizes" => Ok(CheckboxGroup::Size),
            other => Err(StorefrontError::UnknownCheckboxGroup(other.to_string())),
        }
    }
}

impl fmt::Display for CheckboxGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current state of the sidebar inputs. Changes here take effect on the
/// next [`UiEvent::Apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterControls {
    pub brands: BTreeSet<String>,
    pub categories: BTreeSet<Category>,
    pub sizes: BTreeSet<String>,
    pub min_price: u32,
    pub max_price: u32,
    pub sort: SortKey,
    pub search: String,
}

impl FilterControls {
    #[must_use]
    pub fn new(bounds: PriceBounds) -> Self {
        Self {
            brands: BTreeSet::new(),
            categories: BTreeSet::new(),
            sizes: BTreeSet::new(),
            min_price: bounds.floor,
            max_price: bounds.ceiling,
            sort: SortKey::default(),
            search: String::new(),
        }
    }

    /// Snapshot of the checked boxes and price inputs.
    #[must_use]
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            brands: self.brands.clone(),
            categories: self.categories.clone(),
            sizes: self.sizes.clone(),
            price: PriceRange {
                min: self.min_price,
                max: self.max_price,
            },
        }
    }

    /// Unchecks every box, resets the price inputs to `bounds` and clears the
    /// search box. The sort order is left alone.
    pub fn reset(&mut self, bounds: PriceBounds) {
        self.brands.clear();
        self.categories.clear();
        self.sizes.clear();
        self.min_price = bounds.floor;
        self.max_price = bounds.ceiling;
        self.search.clear();
    }

    fn toggle(
        &mut self,
        group: CheckboxGroup,
        value: &str,
        checked: bool,
        brands: &BrandTable,
    ) -> Result<(), StorefrontError> {
        let invalid = || StorefrontError::InvalidCheckboxValue {
            group: group.as_str(),
            value: value.to_string(),
        };
        match group {
            CheckboxGroup::Brand => {
                let brand = brands.normalize(value);
                if brand.is_empty() {
                    return Err(invalid());
                }
                set_membership(&mut self.brands, brand, checked);
            }
            CheckboxGroup::Category => {
                let category = Category::parse(value).ok_or_else(invalid)?;
                set_membership(&mut self.categories, category, checked);
            }
            CheckboxGroup::Size => {
                let size = value.trim();
                if size.is_empty() {
                    return Err(invalid());
                }
                set_membership(&mut self.sizes, size.to_string(), checked);
            }
        }
        Ok(())
    }

    fn set_min_price(&mut self, value: u32, bounds: PriceBounds) {
        self.min_price = bounds.clamp(value);
        if self.min_price > self.max_price {
            std::mem::swap(&mut self.min_price, &mut self.max_price);
        }
    }

    fn set_max_price(&mut self, value: u32, bounds: PriceBounds) {
        self.max_price = bounds.clamp(value);
        if self.min_price > self.max_price {
            std::mem::swap(&mut self.min_price, &mut self.max_price);
        }
    }
}

fn set_membership<T: Ord>(set: &mut BTreeSet<T>, value: T, present: bool) {
    if present {
        set.insert(value);
    } else {
        set.remove(&value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarState {
    #[default]
    Closed,
    Open,
}

impl SidebarState {
    /// State after `event`. Only the toggle opens the sidebar; toggle, close,
    /// overlay click, apply and escape close it.
    #[must_use]
    pub fn next(self, event: &UiEvent) -> Self {
        match (self, event) {
            (SidebarState::Closed, UiEvent::ToggleSidebar) => SidebarState::Open,
            (
                SidebarState::Open,
                UiEvent::ToggleSidebar
                | UiEvent::CloseSidebar
                | UiEvent::OverlayClick
                | UiEvent::Apply
                | UiEvent::Escape,
            ) => SidebarState::Closed,
            (state, _) => state,
        }
    }
}

/// User interactions the storefront reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ToggleCheckbox {
        group: CheckboxGroup,
        value: String,
        checked: bool,
    },
    SetMinPrice(u32),
    SetMaxPrice(u32),
    Apply,
    Clear,
    ChangeSort(SortKey),
    /// Text typed into the search box. Applied once it reaches
    /// [`crate::MIN_QUERY_CHARS`] characters.
    Search(String),
    /// The search form was submitted. Any non-blank text is applied.
    SubmitSearch(String),
    ToggleSidebar,
    CloseSidebar,
    OverlayClick,
    Escape,
    /// Opens the quick view for the product at this catalog index.
    OpenQuickView(usize),
    CloseQuickView,
}

/// Base that site-relative page paths are resolved against.
const RELATIVE_PAGE_BASE: &str = "http://localhost/";

/// Where the storefront is being shown: URL path, query parameters and the
/// page heading, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    pub path: String,
    pub heading: Option<String>,
    pub query: Vec<(String, String)>,
}

impl PageContext {
    /// Parses a page URL or a site-relative path such as
    /// `https://shop.example/brands/nike.html?search=dunk` or
    /// `/brands/nike.html?search=dunk`. The path is kept percent-encoded;
    /// query values are form-decoded.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let parsed = Url::parse(url).or_else(|_| {
            Url::parse(RELATIVE_PAGE_BASE).and_then(|base| base.join(url))
        });
        match parsed {
            Ok(parsed) => Self {
                path: parsed.path().to_string(),
                heading: None,
                query: parsed.query_pairs().into_owned().collect(),
            },
            Err(e) => {
                tracing::debug!(url, error = %e, "unparseable page url, ignoring its context");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn with_heading(mut self, heading: &str) -> Self {
        self.heading = Some(heading.to_string());
        self
    }

    /// First value of a query parameter.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Brand this page is dedicated to: the `brand` query parameter, else a
    /// `/brands/<slug>.html` path, else a `"<Brand> Collection"` heading.
    #[must_use]
    pub fn detect_brand(&self, brands: &BrandTable) -> Option<String> {
        self.query_param("brand")
            .map(|raw| brands.normalize(raw))
            .filter(|brand| !brand.is_empty())
            .or_else(|| brands.from_page_path(&self.path))
            .or_else(|| {
                self.heading
                    .as_deref()
                    .and_then(|heading| brands.from_heading(heading))
            })
    }
}

/// Construction parameters for a [`Storefront`].
#[derive(Debug, Clone)]
pub struct StorefrontOptions {
    pub bounds: PriceBounds,
    pub currency_symbol: String,
    pub brands: BrandTable,
}

impl Default for StorefrontOptions {
    fn default() -> Self {
        Self {
            bounds: PriceBounds::default(),
            currency_symbol: "₹".to_string(),
            brands: BrandTable::default(),
        }
    }
}

impl StorefrontOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig, brands: BrandTable) -> Self {
        Self {
            bounds: config.price_bounds,
            currency_symbol: config.currency_symbol.clone(),
            brands,
        }
    }
}

/// Everything a page shows at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub grid: RenderedGrid,
    pub sidebar: SidebarState,
    /// Quick-view markup while it is open.
    pub quick_view: Option<String>,
    pub sort: SortKey,
    pub search: String,
}

impl RenderedView {
    #[must_use]
    pub fn to_html(&self) -> String {
        let sidebar_class = match self.sidebar {
            SidebarState::Open => "filter-sidebar active",
            SidebarState::Closed => "filter-sidebar",
        };
        let mut out = format!("<aside class=\"{sidebar_class}\"></aside>\n");
        out.push_str(&self.grid.to_html());
        if let Some(modal) = &self.quick_view {
            out.push_str(modal);
            out.push('\n');
        }
        out
    }
}

/// Storefront controller over a loaded catalog.
///
/// Holds the sidebar controls, the catalog indices of the last filtered and
/// sorted subset, and the grid currently shown. Every event is handled to
/// completion before the next.
#[derive(Debug)]
pub struct Storefront {
    products: Arc<[Product]>,
    bounds: PriceBounds,
    brands: BrandTable,
    renderer: GridRenderer,
    controls: FilterControls,
    applied: FilterSelection,
    filtered: Vec<usize>,
    search: Option<SearchQuery>,
    sidebar: SidebarState,
    quick_view: QuickView,
    grid: RenderedGrid,
}

impl Storefront {
    /// Builds the controller and renders the unfiltered catalog.
    ///
    /// The price bounds are widened to cover every catalog price so that no
    /// product sits outside the default price range.
    pub fn new(products: impl Into<Arc<[Product]>>, options: StorefrontOptions) -> Self {
        let StorefrontOptions {
            bounds,
            currency_symbol,
            brands,
        } = options;
        let products: Arc<[Product]> = products.into();
        let bounds = catalog_bounds(&products).map_or(bounds, |catalog| {
            let widened = bounds.union(catalog);
            if widened != bounds {
                tracing::info!(
                    floor = widened.floor,
                    ceiling = widened.ceiling,
                    "widened price bounds to cover the catalog"
                );
            }
            widened
        });
        let mut storefront = Self {
            products,
            bounds,
            brands,
            renderer: GridRenderer::new(&currency_symbol),
            controls: FilterControls::new(bounds),
            applied: FilterSelection::unfiltered(bounds),
            filtered: Vec::new(),
            search: None,
            sidebar: SidebarState::Closed,
            quick_view: QuickView::default(),
            grid: RenderedGrid::default(),
        };
        storefront.run_pipeline();
        storefront
    }

    /// Applies page-level context: pre-selects the page's brand as the only
    /// brand filter and pre-fills the search box, then runs the pipeline.
    pub fn open_page(&mut self, page: &PageContext) -> &RenderedGrid {
        if let Some(brand) = page.detect_brand(&self.brands) {
            tracing::info!(brand = %brand, path = %page.path, "pre-selecting brand for page");
            self.controls.brands.clear();
            self.controls.brands.insert(brand);
        }
        if let Some(search) = page.query_param("search") {
            self.controls.search = search.trim().to_string();
        }
        self.run_pipeline();
        &self.grid
    }

    /// Handles one interaction and returns the grid as it now stands.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::InvalidCheckboxValue`]: a checkbox value that is
    ///   blank or not a known category.
    /// - [`StorefrontError::UnknownProduct`]: a quick view requested for an
    ///   index outside the catalog.
    pub fn handle(&mut self, event: UiEvent) -> Result<&RenderedGrid, StorefrontError> {
        self.sidebar = self.sidebar.next(&event);

        match event {
            UiEvent::ToggleCheckbox {
                group,
                value,
                checked,
            } => {
                self.controls
                    .toggle(group, &value, checked, &self.brands)?;
            }
            UiEvent::SetMinPrice(value) => self.controls.set_min_price(value, self.bounds),
            UiEvent::SetMaxPrice(value) => self.controls.set_max_price(value, self.bounds),
            UiEvent::Apply => self.run_pipeline(),
            UiEvent::Clear => {
                self.controls.reset(self.bounds);
                self.run_pipeline();
            }
            UiEvent::ChangeSort(key) => {
                self.controls.sort = key;
                sort_indices(&mut self.filtered, &self.products, key);
                self.render();
            }
            UiEvent::Search(text) => self.search_for(&text, SearchQuery::parse),
            UiEvent::SubmitSearch(text) => self.search_for(&text, SearchQuery::submitted),
            UiEvent::Escape => self.quick_view.close(),
            UiEvent::OpenQuickView(index) => {
                let product =
                    self.products
                        .get(index)
                        .ok_or(StorefrontError::UnknownProduct {
                            index,
                            len: self.products.len(),
                        })?;
                self.quick_view
                    .open(index, product, self.renderer.currency_symbol());
            }
            UiEvent::CloseQuickView => self.quick_view.close(),
            UiEvent::ToggleSidebar | UiEvent::CloseSidebar | UiEvent::OverlayClick => {}
        }

        Ok(&self.grid)
    }

    #[must_use]
    pub fn grid(&self) -> &RenderedGrid {
        &self.grid
    }

    #[must_use]
    pub fn controls(&self) -> &FilterControls {
        &self.controls
    }

    #[must_use]
    pub fn sidebar(&self) -> SidebarState {
        self.sidebar
    }

    #[must_use]
    pub fn quick_view(&self) -> &QuickView {
        &self.quick_view
    }

    /// The selection used by the last filter run.
    #[must_use]
    pub fn applied_selection(&self) -> &FilterSelection {
        &self.applied
    }

    /// Products currently shown, in display order.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.grid
            .cards
            .iter()
            .filter_map(|card| self.products.get(card.index))
            .collect()
    }

    #[must_use]
    pub fn view(&self) -> RenderedView {
        RenderedView {
            grid: self.grid.clone(),
            sidebar: self.sidebar,
            quick_view: self.quick_view.to_html(),
            sort: self.controls.sort,
            search: self.controls.search.clone(),
        }
    }

    fn search_for(&mut self, text: &str, parse: fn(&str) -> Option<SearchQuery>) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.controls.search.clear();
            self.search = None;
        } else if let Some(query) = parse(trimmed) {
            self.controls.search = trimmed.to_string();
            self.search = Some(query);
        } else {
            tracing::debug!(query = %trimmed, "search query too short, ignoring");
            return;
        }
        self.render();
    }

    fn run_pipeline(&mut self) {
        self.applied = self.controls.selection();
        let mut indices = filter_indices(&self.products, &self.applied);
        sort_indices(&mut indices, &self.products, self.controls.sort);
        self.filtered = indices;
        self.search = SearchQuery::submitted(&self.controls.search);
        self.render();
    }

    fn render(&mut self) {
        // The filter notice only applies when the filters alone leave nothing;
        // otherwise an empty grid is the search's doing.
        let filter_notice =
            is_any_filter_active(&self.applied, self.bounds) && self.filtered.is_empty();
        let products = &self.products;
        let search = self.search.as_ref();
        let items = self
            .filtered
            .iter()
            .filter_map(|&index| products.get(index).map(|product| (index, product)))
            .filter(|(_, product)| search.is_none_or(|query| query.matches(product)));
        self.grid = self.renderer.render(items, filter_notice, search);
        tracing::debug!(
            filtered = self.filtered.len(),
            shown = self.grid.cards.len(),
            filter_notice,
            sort = %self.controls.sort,
            "rendered product grid"
        );
    }
}

fn catalog_bounds(products: &[Product]) -> Option<PriceBounds> {
    let min = products.iter().map(|p| p.price).min()?;
    let max = products.iter().map(|p| p.price).max()?;
    Some(PriceBounds::new(min, max))
}

#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;
