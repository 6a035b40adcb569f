//! Larder CLI - drive storefront actions from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add two of a product to the cart
//! larder cart add 42 --quantity 2
//!
//! # Change the quantity of a cart line
//! larder cart update 7 3
//!
//! # Mark an order as shipped, skipping the confirmation prompt
//! larder orders set-status 1001 shipped --yes
//!
//! # List the status names the server knows about
//! larder orders statuses
//! ```
//!
//! # Environment Variables
//!
//! - `LARDER_API_BASE_URL` - Base URL of the storefront JSON API (required)
//! - `LARDER_SESSION_COOKIE` - Session cookie for authenticated calls
//! - `SENTRY_DSN` - Error tracking DSN
//!
//! See `larder_storefront::config` for the full list.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use larder_core::{OrderStatus, Quantity};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod terminal;

use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "larder")]
#[command(author, version, about = "Larder storefront actions from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Cart actions
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Order management (requires an admin session)
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Debug, Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product identifier
        product_id: String,

        /// Number of units to add
        #[arg(short, long, default_value_t = Quantity::ONE)]
        quantity: Quantity,
    },
    /// Change the quantity of a cart line
    Update {
        /// Cart item identifier
        item_id: String,

        /// New quantity
        quantity: Quantity,
    },
}

#[derive(Debug, Subcommand)]
enum OrderAction {
    /// Change the status of an order
    SetStatus {
        /// Order identifier
        order_id: String,

        /// New status name (see `larder orders statuses`)
        status: String,

        /// Answer yes to the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List known order status names
    Statuses,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok().filter(|dsn| !dsn.is_empty())?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: std::env::var("SENTRY_ENVIRONMENT")
                .ok()
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
    dotenvy::dotenv().ok();

    // Sentry must be initialised before the subscriber
    let sentry_guard = init_sentry();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "larder_cli=info,larder_storefront=info,larder_admin=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if sentry_guard.is_some() {
        tracing::debug!("Sentry initialized");
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(product_id.into(), quantity).await,
            CartAction::Update { item_id, quantity } => {
                commands::cart::update(item_id.into(), quantity).await
            }
        },
        Commands::Orders { action } => match action {
            OrderAction::SetStatus {
                order_id,
                status,
                yes,
            } => {
                commands::orders::set_status(order_id.into(), OrderStatus::new(status), yes).await
            }
            OrderAction::Statuses => {
                commands::orders::list_statuses();
                Ok(())
            }
        },
    }
}
