//! The cart and its line items.
//!
//! A [`Cart`] serializes as a bare JSON array of line items, each being the
//! catalog product object with an extra `amount` field:
//!
//! ```json
//! [{"id":1,"title":"Tênis","price":"179.9","image":"...","amount":2}]
//! ```
//!
//! Deserializing rejects an array that holds two lines for the same product.

use serde::{Deserialize, Deserializer, Serialize, de};

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// One product entry in the cart with a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl LineItem {
    /// Create a line item holding a single unit of `product`.
    #[must_use]
    pub const fn single(product: Product) -> Self {
        Self { product, amount: 1 }
    }

    /// The product ID of this line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times amount, or `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        self.product.price.checked_times(self.amount)
    }
}

/// Ordered collection of line items.
///
/// Product IDs are unique across the cart. Insertion order only matters for
/// display.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<LineItem>::deserialize(deserializer)?;

        let mut cart = Self::new();
        for item in items {
            let id = item.id();
            if !cart.append(item) {
                return Err(de::Error::custom(format_args!(
                    "duplicate line for product {id}"
                )));
            }
        }
        Ok(cart)
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the line for `id`.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.find(id).is_some()
    }

    /// Append a line. Returns `false` without modifying the cart when a line
    /// for the same product already exists.
    pub fn append(&mut self, item: LineItem) -> bool {
        if self.contains(item.id()) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Set the amount on the line for `id`. Returns `false` if absent.
    pub fn set_amount(&mut self, id: ProductId, amount: u32) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                item.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Remove the line for `id`, returning it if present.
    pub fn remove(&mut self, id: ProductId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Sum of all line totals, or `None` on overflow.
    #[must_use]
    pub fn subtotal(&self) -> Option<Price> {
        self.items
            .iter()
            .try_fold(Price::ZERO, |total, item| total.checked_add(item.line_total()?))
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
