//! Integration tests for the RocketShoes cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocketshoes-integration-tests
//! ```
//!
//! Each test gets a [`TestContext`]: a `wiremock` server standing in for the
//! catalog API and a temporary directory backing a [`FileStorage`].

use rocketshoes_core::ProductId;
use rocketshoes_storefront::{CatalogConfig, CartStore, FileStorage, HttpCatalog, MemoryNotifier};
use serde_json::{Value, json};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Cart store wired to the mock catalog and temp-dir storage.
pub type TestStore = CartStore<HttpCatalog, FileStorage, MemoryNotifier>;

/// Mock catalog plus scratch storage for one test.
pub struct TestContext {
    pub server: MockServer,
    pub dir: TempDir,
}

impl TestContext {
    /// Start a mock catalog and create a scratch directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[allow(clippy::expect_used)]
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Storage rooted in the scratch directory.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.dir.path())
    }

    /// A fresh catalog client pointed at the mock server.
    ///
    /// # Panics
    ///
    /// Panics if the mock server URI is not a valid URL.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn catalog(&self) -> HttpCatalog {
        let base_url = Url::parse(&self.server.uri()).expect("mock server uri");
        HttpCatalog::new(&CatalogConfig::new(base_url))
    }

    /// Load a cart store over the scratch storage, as an app would on start-up.
    #[must_use]
    pub fn store(&self) -> TestStore {
        CartStore::load(self.catalog(), self.storage(), MemoryNotifier::new())
    }

    /// Serve `GET /products/{id}`. The mock expects exactly `calls` hits.
    pub async fn mount_product(&self, id: i32, calls: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/products/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_json(id)))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Serve `GET /stock/{id}` with `amount` units available.
    pub async fn mount_stock(&self, id: i32, amount: i32) {
        Mock::given(method("GET"))
            .and(path(format!("/stock/{id}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": id, "amount": amount })),
            )
            .mount(&self.server)
            .await;
    }

    /// Answer `GET {route}` with `status`.
    pub async fn mount_status(&self, route: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }
}

/// Catalog JSON for a product, including an attribute the cart does not model.
#[must_use]
pub fn product_json(id: i32) -> Value {
    json!({
        "id": id,
        "title": format!("Tênis {id}"),
        "price": 139.9,
        "image": format!("https://cdn.example.test/{id}.jpg"),
        "brand": "Rocket"
    })
}

/// `(id, amount)` pairs of a store's cart, in order.
#[must_use]
pub fn amounts(store: &TestStore) -> Vec<(ProductId, u32)> {
    store
        .cart()
        .iter()
        .map(|item| (item.id(), item.amount))
        .collect()
}
