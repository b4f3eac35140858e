//! GoMarketplace cart CLI - inspect and edit the locally persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! gm-cart show
//!
//! # Add one unit of a product
//! gm-cart add --id 1 --title "Camiseta" --image-url https://cdn.example.com/1.png --price 149.90
//!
//! # Change the quantity of a product already in the cart
//! gm-cart increment 1
//! gm-cart decrement 1
//! ```
//!
//! # Environment Variables
//!
//! - `CART_STORAGE_KEY` - Key the cart is stored under (default: products)
//! - `CART_DATA_DIR` - Directory holding the stored cart (default: .go-marketplace)
//! - `RUST_LOG` - Log filter (default: `go_marketplace_cart=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use go_marketplace_core::Price;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "gm-cart")]
#[command(author, version, about = "GoMarketplace cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart
    Show,
    /// Add one unit of a product to the cart
    Add {
        /// Catalog product ID
        #[arg(long)]
        id: String,

        /// Display title
        #[arg(long)]
        title: String,

        /// Product image URL
        #[arg(long)]
        image_url: String,

        /// Unit price (e.g. 19.90)
        #[arg(long)]
        price: Price,
    },
    /// Add one unit of a product already in the cart
    Increment {
        /// Catalog product ID
        id: String,
    },
    /// Remove one unit of a product, dropping it at zero
    Decrement {
        /// Catalog product ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "go_marketplace_cart=info,go_marketplace_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let cart = commands::open_cart().await?;

    match cli.command {
        Commands::Show => {}
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => commands::add(&cart, id, title, image_url, price),
        Commands::Increment { id } => commands::increment(&cart, &id)?,
        Commands::Decrement { id } => commands::decrement(&cart, &id)?,
    }

    cart.flush().await;
    commands::print_cart(&cart);
    Ok(())
}
