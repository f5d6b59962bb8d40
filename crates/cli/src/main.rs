//! Tienda CLI - browse the catalog, manage the cart, and post comments.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog, optionally filtered by category
//! tienda products --category Manga
//!
//! # Build a local cart from product IDs and show the total
//! tienda buy 1 2 2
//!
//! # Log in, then use the server-side cart
//! tienda login -u pao -p secreto
//! tienda cart add 1 --qty 2
//! tienda cart show
//!
//! # Read and write comments
//! tienda comments --product 1
//! tienda comment "Llegó en perfecto estado"
//! ```
//!
//! # Commands
//!
//! - `products`, `product`, `buy` - Catalog and local cart
//! - `cart` - Server-side cart
//! - `login`, `register`, `logout`, `whoami` - Session
//! - `comments`, `comment` - Comment widget

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tienda_core::{CartItemId, ProductId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "tienda")]
#[command(author, version, about = "Tienda storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog
    Products {
        /// Only show this category (`Todas` shows everything)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one product
    Product {
        /// Product ID
        id: ProductId,
    },
    /// Add products to a local cart and show the total
    Buy {
        /// Product IDs, one unit per occurrence
        #[arg(required = true)]
        ids: Vec<ProductId>,
    },
    /// Manage the server-side cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List comments for a product
    Comments {
        /// Product ID (defaults to `TIENDA_COMMENT_PRODUCT_ID`)
        #[arg(short, long)]
        product: Option<ProductId>,
    },
    /// Post a comment
    Comment {
        /// Comment text
        text: String,

        /// Product ID (defaults to `TIENDA_COMMENT_PRODUCT_ID`)
        #[arg(short, long)]
        product: Option<ProductId>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product
    Add {
        /// Product ID
        product: ProductId,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Change a line's quantity
    Update {
        /// Cart item ID
        item: CartItemId,

        /// New quantity
        qty: u32,
    },
    /// Remove a line
    Remove {
        /// Cart item ID
        item: CartItemId,
    },
    /// Empty the cart
    Clear,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CliConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tienda_storefront=info,tienda_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = commands::connect(config)?;

    match cli.command {
        Commands::Products { category } => {
            commands::catalog::list(&client, category.as_deref()).await;
        }
        Commands::Product { id } => commands::catalog::show(&client, id).await,
        Commands::Buy { ids } => commands::catalog::buy(&client, &ids).await,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&client).await,
            CartAction::Add { product, qty } => commands::cart::add(&client, product, qty).await?,
            CartAction::Update { item, qty } => {
                commands::cart::update(&client, item, qty).await?;
            }
            CartAction::Remove { item } => commands::cart::remove(&client, item).await?,
            CartAction::Clear => commands::cart::clear(&client).await?,
        },
        Commands::Login { username, password } => {
            commands::auth::login(&client, username, password).await?;
        }
        Commands::Register {
            username,
            email,
            password,
        } => commands::auth::register(&client, username, email, password).await?,
        Commands::Logout => commands::auth::logout(&client),
        Commands::Whoami => commands::auth::whoami(&client),
        Commands::Comments { product } => {
            let product = product.unwrap_or(config.client.comment_product_id);
            commands::comments::list(&client, &config.client, product).await;
        }
        Commands::Comment { text, product } => {
            let product = product.unwrap_or(config.client.comment_product_id);
            commands::comments::post(&client, &config.client, product, text).await;
        }
    }
    Ok(())
}
