//! Catalog records returned by the product API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ProductId;
use super::price::Price;

/// A product as served by `GET products/{id}`.
///
/// Attributes the cart does not interpret are kept in `extra` and written
/// back unchanged, so line items carry whatever the catalog returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Available quantity for a product, as served by `GET stock/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: ProductId,
    /// Units currently available.
    pub amount: i32,
}

impl StockRecord {
    /// Whether `requested` units can be fulfilled.
    #[must_use]
    pub fn covers(&self, requested: u32) -> bool {
        i64::from(requested) <= i64::from(self.amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_keeps_unknown_attributes() {
        let json = r#"{"id":1,"title":"Tênis de Caminhada","price":179.9,"image":"https://cdn/1.jpg","brand":"Rocket"}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Price::from_cents(17990));
        assert_eq!(product.extra.get("brand"), Some(&Value::from("Rocket")));

        let back = serde_json::to_value(&product).unwrap();
        assert_eq!(back["brand"], "Rocket");
    }

    #[test]
    fn test_product_image_optional() {
        let product: Product = serde_json::from_str(r#"{"id":2,"title":"Meia","price":"9.99"}"#).unwrap();
        assert!(product.image.is_none());
        assert!(product.extra.is_empty());
    }

    #[test]
    fn test_stock_covers() {
        let stock = StockRecord {
            id: ProductId::new(1),
            amount: 3,
        };
        assert!(stock.covers(1));
        assert!(stock.covers(3));
        assert!(!stock.covers(4));

        let empty = StockRecord {
            id: ProductId::new(1),
            amount: -1,
        };
        assert!(!empty.covers(0));
    }
}
