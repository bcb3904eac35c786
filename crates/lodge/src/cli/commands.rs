//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Lodge - block-based content service and maintenance tools
#[derive(Parser, Debug)]
#[command(name = "lodge")]
#[command(about = "Block-based content service for the lodge website", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "LODGE_LOG_JSON")]
    pub json_logs: bool,

    /// Configuration file overriding the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the public and admin HTTP API
    Serve {
        /// Listen address, overriding `[server] bind`
        #[arg(long)]
        bind: Option<String>,
    },

    /// Apply pending database migrations
    Migrate {
        /// Only list the migrations that would run
        #[arg(long)]
        dry_run: bool,
    },

    /// Insert the default pages, suites and testimonials
    Seed,

    /// List pages in priority order
    Pages {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// List the blocks of a page
    Blocks {
        /// Page slug
        slug: String,

        /// Include unpublished drafts
        #[arg(long)]
        all: bool,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Report which expected environment variables are set
    CheckEnv,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_takes_slug_and_all_flag() {
        let cli = Cli::try_parse_from(["lodge", "blocks", "home", "--all", "--format", "json"]).unwrap();

        match cli.command {
            Commands::Blocks { slug, all, format } => {
                assert_eq!(slug, "home");
                assert!(all);
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["lodge", "serve", "--bind", "0.0.0.0:8080", "-v"]).unwrap();

        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Serve { bind: Some(ref b) } if b == "0.0.0.0:8080"));
    }

    #[test]
    fn blocks_requires_a_slug() {
        assert!(Cli::try_parse_from(["lodge", "blocks"]).is_err());
    }

    #[test]
    fn check_env_is_kebab_case() {
        let cli = Cli::try_parse_from(["lodge", "check-env"]).unwrap();
        assert!(matches!(cli.command, Commands::CheckEnv));
    }
}
