//! Internal error type for cart operations.
//!
//! `CartError` never leaves a [`CartStore`](crate::cart::CartStore) operation:
//! it is logged at the operation boundary and replaced by a user-visible
//! [`Notice`](crate::notify::Notice).

use rocketshoes_core::ProductId;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::storage::StorageError;

/// Failure inside a cart operation.
#[derive(Debug, Error)]
pub enum CartError {
    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Storage backend operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Operation targeted a product that has no line in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Catalog answered with a different product than requested.
    #[error("Catalog returned product {returned} for requested product {requested}")]
    ProductMismatch {
        requested: ProductId,
        returned: ProductId,
    },
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::NotInCart(ProductId::new(3));
        assert_eq!(err.to_string(), "Product 3 is not in the cart");

        let err = CartError::ProductMismatch {
            requested: ProductId::new(1),
            returned: ProductId::new(2),
        };
        assert_eq!(
            err.to_string(),
            "Catalog returned product 2 for requested product 1"
        );

        let err = CartError::from(CatalogError::NotFound("/stock/5".to_string()));
        assert_eq!(err.to_string(), "Catalog error: Not found: /stock/5");
    }
}
