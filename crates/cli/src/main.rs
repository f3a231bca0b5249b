//! Vending kiosk CLI - browse, shop and administer a kiosk from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the storefront
//! kiosk catalog
//! kiosk catalog --category Snacks
//!
//! # Simulate a purchase
//! kiosk shop add:cola add:cola add:chips --checkout
//!
//! # Admin (PIN from --pin or KIOSK_ADMIN_PIN)
//! kiosk --pin 000111 admin products list
//! kiosk --pin 000111 admin config set --status out_of_service
//! ```
//!
//! # Commands
//!
//! - `catalog` - Status banner and product grid
//! - `shop` - Apply cart operations against live stock
//! - `admin` - Edit products, config and the admin PIN

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

mod client;
mod commands;

use client::KioskClient;
use commands::CommandError;
use commands::admin::{Admin, ConfigChanges, ProductFields};
use commands::shop::CartOp;

#[derive(Parser)]
#[command(name = "kiosk")]
#[command(author, version, about = "Vending kiosk client")]
struct Cli {
    /// Kiosk server base URL
    #[arg(long, env = "KIOSK_URL", default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Admin PIN
    #[arg(long, env = "KIOSK_ADMIN_PIN", hide_env_values = true)]
    pin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the storefront
    Catalog {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Apply cart operations (add:<id>, sub:<id>, drop:<id>) in order
    Shop {
        ops: Vec<CartOp>,

        /// Check out after the operations
        #[arg(long)]
        checkout: bool,
    },
    /// Admin editor
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Check the PIN
    Login,
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage status, categories and theme
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Change the admin PIN
    Pin {
        /// New PIN (at least 4 characters)
        new_pin: String,
        /// The new PIN again
        confirm: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products with their IDs
    List,
    /// Add a product
    Add(ProductArgs),
    /// Change fields of a product
    Edit {
        id: String,
        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Remove a product
    Remove { id: String },
    /// Download the product list to a JSON file
    Pull { path: PathBuf },
    /// Replace the product list with a JSON file
    Push { path: PathBuf },
}

#[derive(Args)]
struct ProductArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    price: Option<Decimal>,
    #[arg(long, allow_negative_numbers = true)]
    stock: Option<i64>,
}

impl From<ProductArgs> for ProductFields {
    fn from(args: ProductArgs) -> Self {
        Self {
            title: args.title,
            category: args.category,
            price: args.price,
            stock: args.stock,
        }
    }
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current config
    Show,
    /// Update the config; unset options keep their current value
    Set {
        /// live, maintenance or out_of_service
        #[arg(long)]
        status: Option<String>,
        /// Category (repeat for several); replaces the whole list
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long)]
        primary: Option<String>,
        #[arg(long)]
        accent: Option<String>,
        #[arg(long)]
        background_top: Option<String>,
        #[arg(long)]
        background_bottom: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let client = KioskClient::new(&cli.server)?;

    match cli.command {
        Commands::Catalog { category } => {
            commands::catalog::show(&client, category.as_deref()).await?;
        }
        Commands::Shop { ops, checkout } => {
            commands::shop::run(&client, &ops, checkout).await?;
        }
        Commands::Admin { action } => {
            let mut admin = Admin::unlock(&client, cli.pin.as_deref()).await?;
            match action {
                AdminAction::Login => admin.login(),
                AdminAction::Products { action } => match action {
                    ProductAction::List => admin.list_products().await?,
                    ProductAction::Add(fields) => admin.add_product(fields.into()).await?,
                    ProductAction::Edit { id, fields } => {
                        admin.edit_product(&id, fields.into()).await?;
                    }
                    ProductAction::Remove { id } => admin.remove_product(&id).await?,
                    ProductAction::Pull { path } => admin.pull_products(&path).await?,
                    ProductAction::Push { path } => admin.push_products(&path).await?,
                },
                AdminAction::Config { action } => match action {
                    ConfigAction::Show => admin.show_config().await?,
                    ConfigAction::Set {
                        status,
                        categories,
                        primary,
                        accent,
                        background_top,
                        background_bottom,
                    } => {
                        admin
                            .set_config(ConfigChanges {
                                status,
                                categories,
                                primary,
                                accent,
                                background_top,
                                background_bottom,
                            })
                            .await?;
                    }
                },
                AdminAction::Pin { new_pin, confirm } => {
                    admin.change_pin(&new_pin, &confirm).await?;
                }
            }
        }
    }
    Ok(())
}
