//! Lodge CLI binary.
//!
//! This binary provides command-line access to Lodge:
//! - Serve the public and admin HTTP API
//! - Apply migrations and seed default content
//! - Inspect pages and blocks

use anyhow::Result;
use clap::Parser;
use lodge::LodgeConfig;

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    use cli::{Cli, Commands, blocks, check_env, init_tracing, migrate, pages, run_server, seed};

    // Secrets may live in .env; a missing file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    let config = match &cli.config {
        Some(path) => LodgeConfig::from_file(path)?,
        None => LodgeConfig::load()?,
    };

    match cli.command {
        Commands::Serve { bind } => run_server(config, bind).await?,
        Commands::Migrate { dry_run } => migrate(dry_run)?,
        Commands::Seed => seed()?,
        Commands::Pages { format } => pages(&config, format).await?,
        Commands::Blocks { slug, all, format } => blocks(&config, &slug, all, format).await?,
        Commands::CheckEnv => check_env()?,
    }

    Ok(())
}
