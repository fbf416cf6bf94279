//! Product grid markup: cards, notices and the product count label.

use arise_core::{Category, Product};
use serde::Serialize;

use crate::search::SearchQuery;

pub const NO_PRODUCTS_MESSAGE: &str = "No products available under the selected filter.";

/// One rendered product card, addressable by catalog index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub index: usize,
    pub name: String,
    pub html: String,
}

/// The single message shown in place of an empty grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    NoFilterMatch,
    NoSearchMatch { query: String },
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Notice::NoFilterMatch => NO_PRODUCTS_MESSAGE.to_string(),
            Notice::NoSearchMatch { query } => {
                format!("No products match your search for \"{query}\"")
            }
        }
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Notice::NoFilterMatch => format!(
                "<div class=\"no-products-message\">{}</div>",
                escape_html(NO_PRODUCTS_MESSAGE)
            ),
            Notice::NoSearchMatch { .. } => format!(
                "<div class=\"no-results-message\"><h3>No products found</h3><p>{}</p>\
                 <button class=\"btn primary-btn reset-search-btn\">Clear Search</button></div>",
                escape_html(&self.message())
            ),
        }
    }
}

/// The full replacement content of the product grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedGrid {
    pub cards: Vec<Card>,
    pub notice: Option<Notice>,
    pub count_label: String,
}

impl RenderedGrid {
    /// Catalog indices of the displayed cards, in display order.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        self.cards.iter().map(|c| c.index).collect()
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(notice) = &self.notice {
            out.push_str(&notice.to_html());
            out.push('\n');
        }
        out.push_str(&format!(
            "<div class=\"product-count\">{}</div>\n<div class=\"products-grid\">\n",
            escape_html(&self.count_label)
        ));
        for card in &self.cards {
            out.push_str(&card.html);
            out.push('\n');
        }
        out.push_str("</div>\n");
        out
    }
}

/// Renders products into cards using a fixed currency symbol.
#[derive(Debug, Clone)]
pub struct GridRenderer {
    currency_symbol: String,
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self::new("₹")
    }
}

impl GridRenderer {
    #[must_use]
    pub fn new(currency_symbol: &str) -> Self {
        Self {
            currency_symbol: currency_symbol.to_string(),
        }
    }

    #[must_use]
    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Builds the grid for `items` (catalog index and product, in display
    /// order).
    ///
    /// An empty grid carries the filter notice when `filter_active`, else the
    /// search notice when a search is in effect, else no notice.
    pub fn render<'a, I>(
        &self,
        items: I,
        filter_active: bool,
        search: Option<&SearchQuery>,
    ) -> RenderedGrid
    where
        I: IntoIterator<Item = (usize, &'a Product)>,
    {
        let cards: Vec<Card> = items
            .into_iter()
            .map(|(index, product)| Card {
                index,
                name: product.name.clone(),
                html: self.render_card(index, product),
            })
            .collect();

        let notice = match (cards.is_empty(), filter_active) {
            (false, _) => None,
            (true, true) => Some(Notice::NoFilterMatch),
            (true, false) => search.map(|q| Notice::NoSearchMatch {
                query: q.as_str().to_string(),
            }),
        };

        RenderedGrid {
            count_label: product_count_label(cards.len()),
            cards,
            notice,
        }
    }

    #[must_use]
    pub fn render_card(&self, index: usize, product: &Product) -> String {
        let mut html = format!(
            "<div class=\"product-card\" data-index=\"{index}\" data-price=\"{price}\" \
             data-brand=\"{brand}\" data-category=\"{category}\" data-collection=\"{collection}\" \
             data-sizes=\"{sizes}\"{new_attr}>",
            price = product.price,
            brand = escape_html(&product.brand),
            category = product.category.as_str(),
            collection = escape_html(&product.collection),
            sizes = escape_html(&product.sizes.join(",")),
            new_attr = if product.is_new {
                " data-new=\"true\""
            } else {
                ""
            },
        );
        if product.is_new {
            html.push_str("<div class=\"product-tag new\">New</div>");
        }
        let tag_class = if product.category == Category::Unisex {
            "product-category-tag unisex"
        } else {
            "product-category-tag"
        };
        html.push_str(&format!(
            "<div class=\"{tag_class}\">{label}</div>\
             <img src=\"{image}\" alt=\"{name}\" loading=\"lazy\">\
             <div class=\"product-info\"><h3>{name}</h3><div class=\"price\">{price}</div></div>\
             <div class=\"product-actions\">\
             <button class=\"btn quick-view-btn\" data-index=\"{index}\">Quick View</button>\
             </div></div>",
            label = product.category.label(),
            image = escape_html(&product.image),
            name = escape_html(&product.name),
            price = escape_html(&format_price(product.price, &self.currency_symbol)),
        ));
        html
    }
}

/// `symbol` followed by `price` grouped the Indian way: the last three
/// digits, then pairs (`1,29,999`).
#[must_use]
pub fn format_price(price: u32, symbol: &str) -> String {
    let digits = price.to_string();
    if digits.len() <= 3 {
        return format!("{symbol}{digits}");
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{symbol}{},{tail}", groups.join(","))
}

#[must_use]
pub fn product_count_label(count: usize) -> String {
    if count == 1 {
        "1 Product".to_string()
    } else {
        format!("{count} Products")
    }
}

/// Escapes text for use in HTML element content and double-quoted
/// attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
