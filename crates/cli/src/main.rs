//! RocketShoes CLI - drive the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! rocketshoes show
//!
//! # Add one unit of product 1
//! rocketshoes add 1
//!
//! # Set product 1 to three units
//! rocketshoes update 1 3
//!
//! # Remove product 1, then wipe the stored cart
//! rocketshoes remove 1
//! rocketshoes clear
//! ```
//!
//! # Environment Variables
//!
//! See `rocketshoes_storefront::config`. Flags override the environment.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rocketshoes_core::ProductId;
use rocketshoes_storefront::config::{API_URL_VAR, CART_KEY_VAR, STORAGE_DIR_VAR};
use rocketshoes_storefront::{
    CartStore, FileStorage, HttpCatalog, Outcome, StorefrontConfig, TracingNotifier,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "rocketshoes")]
#[command(author, version, about = "RocketShoes cart tools")]
struct Cli {
    /// Catalog API base URL (overrides `ROCKETSHOES_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the stored cart (overrides `ROCKETSHOES_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Storage key of the cart (overrides `ROCKETSHOES_CART_KEY`)
    #[arg(long, global = true)]
    cart_key: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: ProductId,
    },
    /// Set the quantity of a product already in the cart
    Update {
        /// Product ID
        product_id: ProductId,

        /// New quantity (values below 1 are ignored)
        #[arg(allow_negative_numbers = true)]
        amount: i32,
    },
    /// Delete the stored cart
    Clear,
}

impl Cli {
    fn override_for(&self, key: &str) -> Option<String> {
        match key {
            API_URL_VAR => self.api_url.clone(),
            STORAGE_DIR_VAR => self
                .storage_dir
                .as_ref()
                .map(|dir| dir.display().to_string()),
            CART_KEY_VAR => self.cart_key.clone(),
            _ => None,
        }
    }

    /// Load configuration from flags, falling back to the environment.
    fn config(&self) -> Result<StorefrontConfig, rocketshoes_storefront::ConfigError> {
        StorefrontConfig::from_env_with(|key| self.override_for(key))
    }
}

fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rocketshoes=info,rocketshoes_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match run(cli).await {
        Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Outcome, Box<dyn std::error::Error>> {
    let config = cli.config()?;
    tracing::debug!(?config, "Loaded configuration");

    let mut store = CartStore::load_with_key(
        HttpCatalog::new(&config.catalog),
        FileStorage::new(&config.storage_dir),
        TracingNotifier,
        config.cart_key.clone(),
    );

    let outcome = match cli.command {
        Commands::Show => Outcome::Unchanged,
        Commands::Add { product_id } => store.add_product(product_id).await,
        Commands::Remove { product_id } => store.remove_product(product_id),
        Commands::Update { product_id, amount } => {
            store.update_product_amount(product_id, amount).await
        }
        Commands::Clear => store.clear(),
    };

    let mut stdout = std::io::stdout().lock();
    commands::cart::render(&store.view(), &mut stdout)?;
    stdout.flush()?;

    Ok(outcome)
}
