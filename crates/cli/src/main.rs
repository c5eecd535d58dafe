//! Resell CLI - Generate clothing listings from a photo.
//!
//! # Usage
//!
//! ```bash
//! # Upload a photo and generate the listing fields
//! resell generate --image shirt.jpg --brand "Off-White"
//!
//! # Mark the item as rare to steer the pricing model
//! resell generate --image shirt.jpg --brand "Off-White" --rare
//!
//! # Show the current profile (email, tier, generations left)
//! resell account
//!
//! # Forget the locally stored session
//! resell logout
//! ```
//!
//! # Environment Variables
//!
//! - `RESELL_BACKEND_URL` - Base URL of the generation backend (required)
//! - `RESELL_SESSION_FILE` - Where the session token is persisted
//! - `SENTRY_DSN` - Optional error tracking DSN

#![cfg_attr(not(test), forbid(unsafe_code))]
// A terminal front end talks to the user on stdout/stderr.
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;
mod store;

#[derive(Parser)]
#[command(name = "resell")]
#[command(author, version, about = "Sell clothes faster with automatic descriptions and pricing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a photo and generate the listing for it
    Generate {
        /// Path to the item photo (JPG or PNG)
        #[arg(short, long)]
        image: PathBuf,

        /// Brand of the item
        #[arg(short, long)]
        brand: String,

        /// Mark the item as rare or unique
        #[arg(short, long, default_value_t = false)]
        rare: bool,
    },
    /// Show the current profile and subscription state
    Account,
    /// Forget the locally stored session token
    Logout,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
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
    // Load .env before reading SENTRY_DSN
    let _ = dotenvy::dotenv();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "resell_cli=warn,resell_client=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        eprintln!("error: {e}");
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Generate { image, brand, rare } => {
            commands::generate::run(&image, &brand, rare).await?;
        }
        Commands::Account => commands::account::run().await?,
        Commands::Logout => commands::logout::run()?,
    }
    Ok(())
}
