//! Lapsus CLI - License management and local cart tools.
//!
//! # Usage
//!
//! ```bash
//! # List active licenses in a category
//! lapsus licenses list --active --category Gaming
//!
//! # Create a license from a JSON file
//! lapsus licenses create --file license.json
//!
//! # Add two units to the local cart
//! lapsus cart add rainbow-six-unlockall -q 2
//! ```
//!
//! # Commands
//!
//! - `licenses` - List, get, create, update and delete remote licenses
//! - `cart` - Show and edit the persisted local cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use lapsus_storefront::cart::CartStore;
use lapsus_storefront::catalog::Catalog;
use lapsus_storefront::config::{ApiConfig, StorefrontConfig};
use lapsus_storefront::licenses::LicensesClient;
use lapsus_storefront::storage::FileStorage;

mod commands;

#[derive(Parser)]
#[command(name = "lapsus")]
#[command(author, version, about = "Lapsus CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage remote licenses
    Licenses {
        #[command(subcommand)]
        action: LicensesAction,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum LicensesAction {
    /// List licenses
    List {
        /// Only active licenses
        #[arg(long)]
        active: bool,

        /// Only licenses in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one license
    Get { id: String },
    /// Create a license from a JSON file
    Create {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Partially update a license from a JSON file
    Update {
        id: String,

        #[arg(short, long)]
        file: PathBuf,
    },
    /// Delete a license
    Delete { id: String },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a catalog product
    Add {
        product_id: String,

        /// Quantity to add (at least 1)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Set a line's quantity (below 1 removes the line)
    Set {
        product_id: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove { product_id: String },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Licenses { action } => {
            let client = LicensesClient::new(&ApiConfig::from_env()?)?;
            match action {
                LicensesAction::List { active, category } => {
                    print_json(&commands::licenses::list(&client, active, category.as_deref()).await?)?;
                }
                LicensesAction::Get { id } => {
                    print_json(&commands::licenses::get(&client, &id).await?)?;
                }
                LicensesAction::Create { file } => {
                    print_json(&commands::licenses::create(&client, &file).await?)?;
                }
                LicensesAction::Update { id, file } => {
                    print_json(&commands::licenses::update(&client, &id, &file).await?)?;
                }
                LicensesAction::Delete { id } => {
                    commands::licenses::delete(&client, &id).await?;
                    println!("Deleted license {id}");
                }
            }
        }
        Commands::Cart { action } => {
            let config = StorefrontConfig::from_env()?;
            let mut store = CartStore::load(FileStorage::new(&config.cart_path));
            let snapshot = match action {
                CartAction::Show => store.snapshot(),
                CartAction::Add {
                    product_id,
                    quantity,
                } => {
                    let client = LicensesClient::new(&config.api)?;
                    let catalog = Catalog::new(&config.catalog, client);
                    commands::cart::add(&mut store, &catalog, &product_id, quantity).await?
                }
                CartAction::Set {
                    product_id,
                    quantity,
                } => commands::cart::set(&mut store, &product_id, quantity),
                CartAction::Remove { product_id } => commands::cart::remove(&mut store, &product_id),
                CartAction::Clear => commands::cart::clear(&mut store),
            };
            println!("{}", commands::cart::render(&snapshot));
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
