//! Greeny Credit backend server binary.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use greeny_server::{run_server, AppState, ServerConfig};

/// Greeny Credit website backend
#[derive(Parser, Debug)]
#[command(name = "greeny-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Environment file to load before reading configuration
    #[arg(short, long, default_value = ".env")]
    env_file: PathBuf,

    /// Override the listening port (otherwise PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Variables already in the environment win over the file.
    let env_file = dotenvy::from_path(&args.env_file);

    // Initialize logging
    let default_filter = if args.verbose {
        "debug,tower_http=debug"
    } else {
        "info,tower_http=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    match env_file {
        Ok(()) => tracing::info!("Loaded environment from {}", args.env_file.display()),
        Err(e) if e.not_found() => {
            tracing::debug!("No env file at {}", args.env_file.display());
        }
        Err(e) => tracing::warn!("Could not read {}: {}", args.env_file.display(), e),
    }

    let mut config = ServerConfig::from_env().context("invalid configuration")?;
    if let Some(port) = args.port {
        config.port = port;
    }

    let state = AppState::from_config(&config);
    run_server(state, &config).await
}
