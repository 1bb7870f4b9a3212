//! relharmony CLI: the main entry point.
//!
//! Commands:
//! - `versions` List version tags found in a stitched input
//! - `split` Show the fragments between release banners
//! - `extract` Extract the four sections from one fragment
//! - `analyze` Run the full pipeline and print the harmonized document
//! - `judge` Score a judge response
//! - `audit` Check a structured JSON report for gaps
//! - `config` Show or initialize configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod input;
mod output;

#[derive(Parser)]
#[command(
    name = "relharmony",
    about = "relharmony: harmonize stitched multi-version release reports",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON (`{"ok": true, "data": ...}`)
    #[arg(long, global = true)]
    json: bool,

    /// Config file to use instead of ~/.relharmony/config.toml
    #[arg(long, global = true, env = "RELHARMONY_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the version tags found in the input
    Versions {
        /// Input file, or `-` for stdin
        input: PathBuf,
    },

    /// Split the input on release banners
    Split {
        /// Input file, or `-` for stdin
        input: PathBuf,
    },

    /// Extract sections from one fragment
    Extract {
        /// Input file, or `-` for stdin
        input: PathBuf,

        /// Fragment to extract when the input holds several
        #[arg(short, long, default_value_t = 0)]
        index: usize,
    },

    /// Run the full pipeline and print the harmonized document
    Analyze {
        /// Input file, or `-` for stdin
        input: PathBuf,

        /// Product discriminator (WST or TM); defaults to the configured product
        #[arg(short, long)]
        product: Option<String>,
    },

    /// Parse a judge response into scores
    Judge {
        /// Input file, or `-` for stdin
        input: PathBuf,
    },

    /// Audit a structured JSON report produced from a harmonized document
    Audit {
        /// Input file, or `-` for stdin
        input: PathBuf,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for command output
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = commands::Context::new(cli.json, cli.config);

    match cli.command {
        Commands::Versions { input } => commands::versions::run(&ctx, &input).await?,
        Commands::Split { input } => commands::split::run(&ctx, &input).await?,
        Commands::Extract { input, index } => commands::extract::run(&ctx, &input, index).await?,
        Commands::Analyze { input, product } => {
            commands::analyze::run(&ctx, &input, product).await?
        }
        Commands::Judge { input } => commands::judge::run(&ctx, &input).await?,
        Commands::Audit { input } => commands::audit::run(&ctx, &input).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(&ctx).await?,
            ConfigAction::Init { force } => commands::config_cmd::init(&ctx, force).await?,
            ConfigAction::Path => commands::config_cmd::path(&ctx).await?,
        },
    }

    Ok(())
}
