mod session;
mod snapshot;
mod tui;

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use bscdapp::config::{AppConfig, LoggingConfig};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "bscdapp")]
#[command(about = "Binance Smart Chain dapp connector demo")]
struct Cli {
    /// Config file base name, replacing config/default
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the Terminal User Interface
    Tui,
    /// Mount the page without a terminal UI and print what it shows
    Snapshot {
        /// Enable the extension before printing
        #[arg(long)]
        enable: bool,
        /// Print the lines as a JSON array
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Tui => {
            // The terminal belongs to the UI, so logs go to a file
            init_logging(&config.logging, true)?;
            info!("Starting bscdapp v{}", env!("CARGO_PKG_VERSION"));
            tui::run_tui(&config).await
        }
        Commands::Snapshot { enable, json } => {
            init_logging(&config.logging, false)?;
            snapshot::run(&config, enable, json).await
        }
    }
}

fn init_logging(logging: &LoggingConfig, to_file: bool) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = log_path(logging);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

fn log_path(logging: &LoggingConfig) -> PathBuf {
    logging.file.clone().unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bscdapp")
            .join("bscdapp.log")
    })
}
