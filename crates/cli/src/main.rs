//! Back-office CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the customers and orders tables
//! bo-cli migrate
//!
//! # Verify the database answers
//! bo-cli check
//!
//! # Insert a few sample customers and orders
//! bo-cli seed
//! ```
//!
//! # Environment Variables
//!
//! - `BACKOFFICE_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bo-cli")]
#[command(author, version, about = "Back-office CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Open a connection and ping the database
    Check,
    /// Insert sample customers and orders
    Seed {
        /// Number of sample customers to create
        #[arg(short, long, default_value_t = 3)]
        customers: u8,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), commands::CommandError> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Check => commands::check::run().await?,
        Commands::Seed { customers } => commands::seed::run(customers).await?,
    }
    Ok(())
}
