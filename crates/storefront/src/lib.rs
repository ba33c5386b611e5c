//! RocketShoes Storefront - cart state for the storefront front-end.
//!
//! # Architecture
//!
//! - [`cart::CartStore`] holds the cart and runs add/remove/update operations
//! - [`catalog::Catalog`] supplies product data and stock levels (REST via `reqwest`)
//! - [`storage::Storage`] persists the serialized cart under a single key
//! - [`notify::Notifier`] receives user-visible notices
//!
//! Every collaborator is injected, so the same store runs in a terminal,
//! a desktop shell or a test harness.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_storefront::{CartStore, HttpCatalog, FileStorage, TracingNotifier};
//!
//! let config = StorefrontConfig::from_env_with(|_| None)?;
//! let mut store = CartStore::load_with_key(
//!     HttpCatalog::new(&config.catalog),
//!     FileStorage::new(&config.storage_dir),
//!     TracingNotifier,
//!     config.cart_key.clone(),
//! );
//!
//! store.add_product(ProductId::new(1)).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod storage;

pub use cart::{CartItemView, CartStore, CartView, Outcome};
pub use catalog::{Catalog, CatalogError, HttpCatalog};
pub use config::{CatalogConfig, ConfigError, StorefrontConfig};
pub use error::CartError;
pub use notify::{MemoryNotifier, Notice, Notifier, TracingNotifier};
pub use storage::{CART_KEY, FileStorage, MemoryStorage, Storage, StorageError};
