//! End-to-end cart tests against a mocked catalog API and file storage.

#![allow(clippy::unwrap_used)]

use rocketshoes_core::{Cart, ProductId};
use rocketshoes_integration_tests::{TestContext, amounts};
use rocketshoes_storefront::{CART_KEY, Notice, Outcome, Storage};

fn persisted(ctx: &TestContext) -> Option<String> {
    ctx.storage().get(CART_KEY).unwrap()
}

// =============================================================================
// Add
// =============================================================================

#[tokio::test]
async fn test_add_to_empty_cart() {
    let ctx = TestContext::new().await;
    ctx.mount_stock(1, 5).await;
    ctx.mount_product(1, 1).await;

    let mut store = ctx.store();
    assert_eq!(store.add_product(ProductId::new(1)).await, Outcome::Updated);

    assert_eq!(amounts(&store), vec![(ProductId::new(1), 1)]);
    assert_eq!(
        persisted(&ctx).unwrap(),
        serde_json::to_string(store.cart()).unwrap()
    );
    assert!(store.notifier().notices().is_empty());
}

#[tokio::test]
async fn test_add_twice_increments_amount() {
    let ctx = TestContext::new().await;
    ctx.mount_stock(1, 5).await;
    ctx.mount_product(1, 1).await;

    let mut store = ctx.store();
    assert_eq!(store.add_product(ProductId::new(1)).await, Outcome::Updated);
    assert_eq!(store.add_product(ProductId::new(1)).await, Outcome::Updated);

    assert_eq!(amounts(&store), vec![(ProductId::new(1), 2)]);

    let stored: Cart = serde_json::from_str(&persisted(&ctx).unwrap()).unwrap();
    assert_eq!(&stored, store.cart());
}

#[tokio::test]
async fn test_add_beyond_stock_is_rejected() {
    let ctx = TestContext::new().await;
    ctx.mount_stock(1, 1).await;
    ctx.mount_product(1, 1).await;

    let mut store = ctx.store();
    assert_eq!(store.add_product(ProductId::new(1)).await, Outcome::Updated);
    let before = persisted(&ctx);

    assert_eq!(store.add_product(ProductId::new(1)).await, Outcome::OutOfStock);

    assert_eq!(amounts(&store), vec![(ProductId::new(1), 1)]);
    assert_eq!(persisted(&ctx), before);
    assert_eq!(store.notifier().notices(), vec![Notice::InsufficientStock]);
}

#[tokio::test]
async fn test_add_unknown_product() {
    let ctx = TestContext::new().await;
    ctx.mount_stock(9, 3).await;
    ctx.mount_status("/products/9", 404).await;

    let mut store = ctx.store();
    assert_eq!(store.add_product(ProductId::new(9)).await, Outcome::Failed);

    assert!(store.cart().is_empty());
    assert!(persisted(&ctx).is_none());
    assert_eq!(store.notifier().notices(), vec![Notice::AddFailed]);
}

#[tokio::test]
async fn test_add_when_catalog_is_down() {
    let ctx = TestContext::new().await;
    ctx.mount_status("/stock/1", 503).await;

    let mut store = ctx.store();
    assert_eq!(store.add_product(ProductId::new(1)).await, Outcome::Failed);

    assert!(store.cart().is_empty());
    assert_eq!(store.notifier().notices(), vec![Notice::AddFailed]);
}

#[tokio::test]
async fn test_catalog_attributes_are_persisted() {
    let ctx = TestContext::new().await;
    ctx.mount_stock(3, 2).await;
    ctx.mount_product(3, 1).await;

    let mut store = ctx.store();
    assert_eq!(store.add_product(ProductId::new(3)).await, Outcome::Updated);

    let stored: serde_json::Value = serde_json::from_str(&persisted(&ctx).unwrap()).unwrap();
    assert_eq!(stored[0]["id"], 3);
    assert_eq!(stored[0]["title"], "Tênis 3");
    assert_eq!(stored[0]["brand"], "Rocket");
    assert_eq!(stored[0]["amount"], 1);
}

// =============================================================================
// Remove and update
// =============================================================================

#[tokio::test]
async fn test_remove_only_line() {
    let ctx = TestContext::new().await;
    ctx.mount_stock(1, 5).await;
    ctx.mount_product(1, 1).await;

    let mut store = ctx.store();
    assert_eq!(store.add_product(ProductId::new(1)).await, Outcome::Updated);
    assert_eq!(store.add_product(ProductId::new(1)).await, Outcome::Updated);

    assert_eq!(store.remove_product(ProductId::new(1)), Outcome::Updated);

    assert!(store.cart().is_empty());
    assert_eq!(persisted(&ctx).as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_remove_absent_line() {
    let ctx = TestContext::new().await;

    let mut store = ctx.store();
    assert_eq!(store.remove_product(ProductId::new(4)), Outcome::Failed);

    assert!(persisted(&ctx).is_none());
    assert_eq!(store.notifier().notices(), vec![Notice::RemoveFailed]);
}

#[tokio::test]
async fn test_update_amount_round_trip() {
    let ctx = TestContext::new().await;
    ctx.mount_stock(2, 4).await;
    ctx.mount_product(2, 1).await;

    let mut store = ctx.store();
    assert_eq!(store.add_product(ProductId::new(2)).await, Outcome::Updated);

    assert_eq!(
        store.update_product_amount(ProductId::new(2), 4).await,
        Outcome::Updated
    );
    assert_eq!(
        store.update_product_amount(ProductId::new(2), 5).await,
        Outcome::OutOfStock
    );
    assert_eq!(
        store.update_product_amount(ProductId::new(2), 0).await,
        Outcome::Unchanged
    );

    assert_eq!(amounts(&store), vec![(ProductId::new(2), 4)]);
    assert_eq!(store.view().subtotal, "$559.60");
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_cart_survives_restart() {
    let ctx = TestContext::new().await;
    ctx.mount_stock(1, 5).await;
    ctx.mount_stock(2, 5).await;
    ctx.mount_product(1, 1).await;
    ctx.mount_product(2, 1).await;

    {
        let mut store = ctx.store();
        assert_eq!(store.add_product(ProductId::new(2)).await, Outcome::Updated);
        assert_eq!(store.add_product(ProductId::new(1)).await, Outcome::Updated);
        assert_eq!(store.add_product(ProductId::new(1)).await, Outcome::Updated);
    }

    let store = ctx.store();
    assert_eq!(
        amounts(&store),
        vec![(ProductId::new(2), 1), (ProductId::new(1), 2)]
    );
}

#[tokio::test]
async fn test_malformed_stored_cart_is_replaced() {
    let ctx = TestContext::new().await;
    ctx.mount_stock(1, 5).await;
    ctx.mount_product(1, 1).await;
    ctx.storage().set(CART_KEY, "{\"oops\":").unwrap();

    let mut store = ctx.store();
    assert!(store.cart().is_empty());

    assert_eq!(store.add_product(ProductId::new(1)).await, Outcome::Updated);

    let stored: Cart = serde_json::from_str(&persisted(&ctx).unwrap()).unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_clear_deletes_stored_cart() {
    let ctx = TestContext::new().await;
    ctx.mount_stock(1, 5).await;
    ctx.mount_product(1, 1).await;

    let mut store = ctx.store();
    assert_eq!(store.add_product(ProductId::new(1)).await, Outcome::Updated);
    assert_eq!(store.clear(), Outcome::Updated);

    assert!(persisted(&ctx).is_none());
    assert!(ctx.store().cart().is_empty());
}

#[tokio::test]
async fn test_unwritable_storage_leaves_cart_unchanged() {
    let ctx = TestContext::new().await;
    ctx.mount_stock(1, 5).await;
    ctx.mount_product(1, 1).await;

    // A plain file where the storage directory should be
    let blocker = ctx.dir.path().join("blocked");
    std::fs::write(&blocker, "x").unwrap();

    let mut store = rocketshoes_storefront::CartStore::load(
        ctx.catalog(),
        rocketshoes_storefront::FileStorage::new(&blocker),
        rocketshoes_storefront::MemoryNotifier::new(),
    );

    assert_eq!(store.add_product(ProductId::new(1)).await, Outcome::Failed);

    assert!(store.cart().is_empty());
    assert_eq!(store.notifier().notices(), vec![Notice::AddFailed]);
}
