//! Geolens - guess where a photo was taken.
//!
//! Serves `POST /analyze`, which runs an image URL through a reverse image
//! search and a multimodal LLM and returns a merged location guess.
//!
//! # Usage
//!
//! ```bash
//! # Run the HTTP API on 0.0.0.0:5001
//! geolens serve
//!
//! # Analyze a single image from the command line
//! geolens analyze https://example.com/photo.jpg --pretty
//!
//! # View configuration
//! geolens config show
//! ```

use clap::{Parser, Subcommand};
use geolens_core::Config;

mod cli;
mod logging;
mod server;

/// Geolens - guess where a photo was taken.
#[derive(Parser, Debug)]
#[command(name = "geolens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Path to config file (defaults to the platform config directory)
    #[arg(short, long, global = true, env = "GEOLENS_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve(cli::serve::ServeArgs),

    /// Analyze one image URL and print the result as JSON
    Analyze(cli::analyze::AnalyzeArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // An explicit --config must load; the default location may be absent or
    // broken, in which case we warn and fall back to defaults.
    // Logging isn't initialized yet, so use eprintln for config warnings.
    let explicit_path = cli.config.as_deref().map(Config::expand_path);
    let config_path = explicit_path.clone().unwrap_or_else(Config::default_path);
    let config = match &explicit_path {
        Some(path) => match &cli.command {
            // `config init` is allowed to point at a file that doesn't exist yet
            Commands::Config(_) if !path.exists() => Config::default(),
            _ => Config::load_from(path)?,
        },
        None => match Config::load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load config: {e}\n  \
                     Using default configuration. Check your config file with `geolens config path`."
                );
                Config::default()
            }
        },
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Geolens v{}", geolens_core::VERSION);

    match cli.command {
        Commands::Serve(args) => cli::serve::execute(args, config).await,
        Commands::Analyze(args) => cli::analyze::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, &config, &config_path).await,
    }
}
