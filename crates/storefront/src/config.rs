//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ROCKETSHOES_API_URL` - Base URL of the catalog API (serves `products/{id}` and `stock/{id}`)
//!
//! ## Optional
//! - `ROCKETSHOES_API_TOKEN` - Bearer token sent to the catalog API
//! - `ROCKETSHOES_STORAGE_DIR` - Directory for the file-backed cart store (default: .rocketshoes)
//! - `ROCKETSHOES_CART_KEY` - Storage key the cart is persisted under (default: @RocketShoes:cart)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::storage::CART_KEY;

pub const API_URL_VAR: &str = "ROCKETSHOES_API_URL";
pub const API_TOKEN_VAR: &str = "ROCKETSHOES_API_TOKEN";
pub const STORAGE_DIR_VAR: &str = "ROCKETSHOES_STORAGE_DIR";
pub const CART_KEY_VAR: &str = "ROCKETSHOES_CART_KEY";

const DEFAULT_STORAGE_DIR: &str = ".rocketshoes";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Directory for the file-backed cart store
    pub storage_dir: PathBuf,
    /// Storage key holding the serialized cart
    pub cart_key: String,
}

/// Catalog API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API
    pub base_url: Url,
    /// Optional bearer token
    pub api_token: Option<SecretString>,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl CatalogConfig {
    /// Configuration for an unauthenticated catalog at `base_url`.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_token: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. Values
    /// returned by `overrides` take precedence over the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env_with<F>(overrides: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| overrides(key).or_else(|| std::env::var(key).ok()))
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(API_URL_VAR.to_string()))?;
        let base_url = parse_base_url(&raw_url)?;

        let api_token = lookup(API_TOKEN_VAR)
            .filter(|v| !v.is_empty())
            .map(SecretString::from);

        let storage_dir = lookup(STORAGE_DIR_VAR)
            .filter(|v| !v.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let cart_key = lookup(CART_KEY_VAR)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| CART_KEY.to_string());

        Ok(Self {
            catalog: CatalogConfig {
                base_url,
                api_token,
            },
            storage_dir,
            cart_key,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse the catalog base URL, requiring an http(s) scheme.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(API_URL_VAR.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            API_URL_VAR.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}
