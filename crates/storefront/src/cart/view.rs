//! Display projection of the cart for rendering layers.

use rocketshoes_core::{Cart, LineItem, Price, ProductId};

/// Shown in place of a total that does not fit in a decimal.
const OVERFLOW: &str = "n/a";

/// Cart item display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub amount: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_string(),
            item_count: 0,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.iter().map(CartItemView::from).collect(),
            subtotal: format_total(cart.subtotal(), || OVERFLOW.to_string()),
            item_count: cart.total_quantity(),
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id(),
            title: item.product.title.clone(),
            amount: item.amount,
            price: item.product.price.to_string(),
            line_price: format_total(item.line_total(), || {
                format!("{} x {}", item.amount, item.product.price)
            }),
            image: item.product.image.clone(),
        }
    }
}

fn format_total(total: Option<Price>, fallback: impl FnOnce() -> String) -> String {
    total.map_or_else(fallback, |price| price.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rocketshoes_core::{Price, Product};
    use serde_json::Map;

    use super::*;

    #[test]
    fn test_empty_view_matches_empty_cart() {
        assert_eq!(CartView::from(&Cart::new()), CartView::empty());
    }

    #[test]
    fn test_view_formats_prices() {
        let mut cart = Cart::new();
        cart.append(LineItem {
            product: Product {
                id: ProductId::new(1),
                title: "Tênis".to_string(),
                price: Price::from_cents(17990),
                image: Some("1.jpg".to_string()),
                extra: Map::new(),
            },
            amount: 2,
        });

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.subtotal, "$359.80");

        let [item] = view.items.as_slice() else {
            panic!("expected one item");
        };
        assert_eq!(item.price, "$179.90");
        assert_eq!(item.line_price, "$359.80");
        assert_eq!(item.image.as_deref(), Some("1.jpg"));
    }

    #[test]
    fn test_view_survives_total_overflow() {
        let cart: Cart = serde_json::from_str(
            r#"[{"id":1,"title":"a","price":"79228162514264337593543950335","amount":2}]"#,
        )
        .unwrap();

        let view = CartView::from(&cart);
        assert_eq!(view.subtotal, "n/a");
        assert_eq!(view.item_count, 2);

        let [item] = view.items.as_slice() else {
            panic!("expected one item");
        };
        assert_eq!(item.line_price, format!("2 x {}", item.price));
    }
}
