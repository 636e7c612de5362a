//! CapStore CLI - store seeding and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the catalog with a starter set of caps
//! capstore-cli seed
//!
//! # Seed into an explicit data directory, replacing any existing catalog
//! capstore-cli seed --data-dir ./data --force
//!
//! # Show what the JSON stores currently hold
//! capstore-cli stores show
//!
//! # Clear one store (or all of them)
//! capstore-cli stores clear cart
//! ```
//!
//! # Commands
//!
//! - `seed` - Populate the catalog store with demo products
//! - `stores show` - Summarize the catalog, cart, and profile stores
//! - `stores clear` - Reset stores to their empty state

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "capstore-cli")]
#[command(author, version, about = "CapStore CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Populate the catalog store with demo products
    Seed {
        /// Data directory holding the JSON stores (default: $STORE_DATA_DIR or ./data)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Replace an existing non-empty catalog instead of refusing
        #[arg(long)]
        force: bool,
    },
    /// Inspect or reset the JSON stores
    Stores {
        #[command(subcommand)]
        action: StoresAction,
    },
}

#[derive(Subcommand)]
enum StoresAction {
    /// Summarize what each store currently holds
    Show {
        /// Data directory holding the JSON stores (default: $STORE_DATA_DIR or ./data)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Reset a store to its empty state
    Clear {
        /// Which store to clear
        target: ClearTarget,

        /// Data directory holding the JSON stores (default: $STORE_DATA_DIR or ./data)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ClearTarget {
    Catalog,
    Cart,
    Profile,
    All,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { data_dir, force } => {
            commands::seed::catalog(&resolve_data_dir(data_dir), force)?;
        }
        Commands::Stores { action } => match action {
            StoresAction::Show { data_dir } => {
                commands::stores::show(&resolve_data_dir(data_dir));
            }
            StoresAction::Clear { target, data_dir } => {
                commands::stores::clear(&resolve_data_dir(data_dir), target)?;
            }
        },
    }
    Ok(())
}

/// Resolve the data directory: flag, then `STORE_DATA_DIR`, then `./data`.
fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    dotenvy::dotenv().ok();
    flag.unwrap_or_else(|| {
        std::env::var("STORE_DATA_DIR").map_or_else(|_| PathBuf::from("./data"), PathBuf::from)
    })
}
