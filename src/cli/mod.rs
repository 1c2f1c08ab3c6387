//! CLI module for the staff directory
//!
//! Subcommands:
//! - `serve`: run the HTTP API (default)
//! - `seed`: wipe the store and load the demo dataset
//! - `reconcile`: repair department member sets once and exit

pub mod reconcile;
pub mod seed;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Staff directory - employees, departments and their memberships
#[derive(Parser)]
#[command(name = "staff-directory")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),

    /// Clear both collections and load the demo dataset
    Seed,

    /// Rebuild department member sets from employee records
    Reconcile(reconcile::ReconcileArgs),
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = load_config()?;

        match self.command {
            Some(Command::Serve(args)) => serve::run(config, args).await,
            None => serve::run(config, serve::ServeArgs::default()).await,
            Some(Command::Seed) => seed::run(config).await,
            Some(Command::Reconcile(args)) => reconcile::run(config, args).await,
        }
    }
}

/// Read `.env`, load layered configuration and install logging
fn load_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
