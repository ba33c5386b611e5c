//! RocketShoes Core - Shared types library.
//!
//! This crate provides the domain types used across the RocketShoes cart:
//! - `storefront` - Cart store, catalog client and persistence backends
//! - `cli` - Terminal front-end driving the cart store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, catalog records, line items and the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
