//! CLI entry point for labmsg.
//!
//! This binary provides the `labmsg` command, which starts the message
//! HTTP service. Running it without a subcommand is the same as
//! `labmsg serve` with no flags.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use labmsg_web::{WebConfig, WebServer};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// labmsg -- a small JSON-file backed message service.
#[derive(Parser)]
#[command(
    name = "labmsg",
    version,
    about = "labmsg -- CRUD HTTP service for messages",
    long_about = "Serves create/read/update/delete endpoints under /msg and persists \
                  every change to a single JSON file."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve(ServeArgs),
}

/// Flags for `serve`. Anything unset falls back to the environment
/// (`PORT`, `LABMSG_BIND`, `LABMSG_DATA_DIR`), then to the defaults.
#[derive(clap::Args, Default)]
struct ServeArgs {
    /// Address to bind the HTTP server to.
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on.
    #[arg(long, short)]
    port: Option<u16>,

    /// Directory holding messages.json.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl ServeArgs {
    fn apply(self, mut config: WebConfig) -> WebConfig {
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
        config
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine; anything else is worth knowing about.
    let dotenv = dotenvy::dotenv();

    init_tracing("info");

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "failed to load .env"),
    }

    match cli.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => cmd_serve(args).await,
    }
}

// ---------------------------------------------------------------------------
// Subcommand: serve
// ---------------------------------------------------------------------------

async fn cmd_serve(args: ServeArgs) -> Result<()> {
    let config = args.apply(WebConfig::from_env());
    info!(
        addr = %config.addr(),
        data_dir = %config.data_dir.display(),
        "configuration loaded"
    );

    WebServer::new(config)
        .start()
        .await
        .map_err(|e| anyhow!("web server failed: {e}"))
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
