//! Rocket Shoes CLI - drive the cart from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! rs-cart products
//!
//! # Add, change and remove items
//! rs-cart add 1
//! rs-cart update 1 3
//! rs-cart remove 1
//!
//! # Show the cart as JSON
//! rs-cart --json show
//! ```
//!
//! # Commands
//!
//! - `show` - Print the cart
//! - `products` - List the catalog
//! - `add` - Add one unit of a product
//! - `remove` - Remove a product
//! - `update` - Set a product's amount

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rocketshoes_cart::NoticeKind;
use rocketshoes_core::ProductId;

mod commands;

use commands::cart::CommandError;

#[derive(Parser)]
#[command(name = "rs-cart")]
#[command(author, version, about = "Rocket Shoes cart")]
struct Cli {
    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart
    Show,
    /// List the catalog
    Products,
    /// Add one unit of a product
    Add {
        /// Product ID
        id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Set the amount of a product already in the cart
    Update {
        /// Product ID
        id: ProductId,

        /// New amount (must be at least 1)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rocketshoes_cart=warn,rocketshoes_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        match &e {
            CommandError::Cart(err) => {
                let notice = err.notice();
                match notice.kind {
                    NoticeKind::Warning => tracing::warn!(reason = %err, "{notice}"),
                    NoticeKind::Error => tracing::error!(reason = %err, "{notice}"),
                }
            }
            _ => tracing::error!("Command failed: {e}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let store = commands::cart::open_store()?;
    let json = cli.json;

    match cli.command {
        Commands::Show => commands::cart::show(&store, json)?,
        Commands::Products => commands::cart::products(&store, json).await?,
        Commands::Add { id } => commands::cart::add(&store, id, json).await?,
        Commands::Remove { id } => commands::cart::remove(&store, id, json).await?,
        Commands::Update { id, amount } => {
            commands::cart::update(&store, id, amount, json).await?;
        }
    }
    Ok(())
}
