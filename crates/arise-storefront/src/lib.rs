//! Filter, sort, search and render pipeline for the storefront grid.
//!
//! Everything here is synchronous and operates on an already-loaded product
//! slice. [`Storefront`] composes the stages and reacts to [`UiEvent`]s.

pub mod error;
pub mod filter;
pub mod quick_view;
pub mod render;
pub mod search;
pub mod sort;
pub mod ui;

pub use error::StorefrontError;
pub use filter::{
    filter_indices, filter_products, is_any_filter_active, matches, FilterSelection, PriceRange,
};
pub use quick_view::{QuickView, QuickViewContent};
pub use render::{
    escape_html, format_price, product_count_label, Card, GridRenderer, Notice, RenderedGrid,
    NO_PRODUCTS_MESSAGE,
};
pub use search::{SearchQuery, MIN_QUERY_CHARS};
pub use sort::{sort_indices, sort_products, SortKey};
pub use ui::{
    CheckboxGroup, FilterControls, PageContext, RenderedView, SidebarState, Storefront,
    StorefrontOptions, UiEvent,
};
