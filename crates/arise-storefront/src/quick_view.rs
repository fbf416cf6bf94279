use arise_core::Product;
use serde::Serialize;

use crate::render::{escape_html, format_price};

/// What the quick-view surface shows for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickViewContent {
    pub index: usize,
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
    /// Size button labels, e.g. `"UK 9"`.
    pub sizes: Vec<String>,
}

/// The single product detail surface. Opening a product replaces whatever
/// was shown before.
#[derive(Debug, Clone, Default)]
pub struct QuickView {
    content: Option<QuickViewContent>,
    visible: bool,
}

impl QuickView {
    pub fn open(&mut self, index: usize, product: &Product, currency_symbol: &str) {
        self.content = Some(QuickViewContent {
            index,
            name: product.name.clone(),
            price: format_price(product.price, currency_symbol),
            image: product.image.clone(),
            description: format!(
                "Experience premium quality with our 1:1 replica of the {}. \
                 Perfect craftsmanship, premium materials, and unbeatable comfort.",
                product.name
            ),
            sizes: product.sizes.iter().map(|s| format!("UK {s}")).collect(),
        });
        self.visible = true;
    }

    /// Hides the surface. The last content is kept until the next `open`.
    pub fn close(&mut self) {
        self.visible = false;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn content(&self) -> Option<&QuickViewContent> {
        self.content.as_ref()
    }

    /// Modal markup while open, `None` while hidden.
    #[must_use]
    pub fn to_html(&self) -> Option<String> {
        if !self.visible {
            return None;
        }
        let content = self.content.as_ref()?;
        let sizes: String = content
            .sizes
            .iter()
            .map(|s| format!("<button class=\"size-btn\">{}</button>", escape_html(s)))
            .collect();
        Some(format!(
            "<div class=\"quick-view-modal active\" data-index=\"{index}\">\
             <div class=\"modal-image\"><img src=\"{image}\" alt=\"{name}\"></div>\
             <h2 class=\"modal-title\">{name}</h2>\
             <div class=\"modal-price\">{price}</div>\
             <p class=\"modal-description\">{description}</p>\
             <div class=\"size-options\">{sizes}</div>\
             <button class=\"close-modal\">&times;</button></div>",
            index = content.index,
            image = escape_html(&content.image),
            name = escape_html(&content.name),
            price = escape_html(&content.price),
            description = escape_html(&content.description),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arise_core::Category;

    fn product(name: &str, sizes: &[&str]) -> Product {
        Product {
            name: name.to_string(),
            brand: "asics".to_string(),
            price: 12_499,
            category: Category::Women,
            collection: "General".to_string(),
            sizes: sizes.iter().map(|s| (*s).to_string()).collect(),
            image: "images/gel.webp".to_string(),
            is_new: false,
        }
    }

    #[test]
    fn starts_closed_and_empty() {
        let qv = QuickView::default();
        assert!(!qv.is_open());
        assert!(qv.content().is_none());
        assert!(qv.to_html().is_none());
    }

    #[test]
    fn open_populates_content() {
        let mut qv = QuickView::default();
        qv.open(3, &product("Gel-Kayano 14", &["6", "7.5"]), "₹");

        let content = qv.content().unwrap();
        assert!(qv.is_open());
        assert_eq!(content.index, 3);
        assert_eq!(content.price, "₹12,499");
        assert_eq!(content.sizes, vec!["UK 6", "UK 7.5"]);
        assert!(content
            .description
            .starts_with("Experience premium quality with our 1:1 replica of the Gel-Kayano 14."));
    }

    #[test]
    fn opening_again_replaces_content() {
        let mut qv = QuickView::default();
        qv.open(0, &product("First", &["8"]), "₹");
        qv.open(1, &product("Second", &["9"]), "₹");

        assert_eq!(qv.content().unwrap().name, "Second");
        let html = qv.to_html().unwrap();
        assert_eq!(html.matches("quick-view-modal").count(), 1);
        assert!(!html.contains("First"));
    }

    #[test]
    fn close_hides_markup() {
        let mut qv = QuickView::default();
        qv.open(0, &product("Gel", &["8"]), "₹");
        qv.close();
        assert!(!qv.is_open());
        assert!(qv.to_html().is_none());
        assert!(qv.content().is_some());
    }
}
