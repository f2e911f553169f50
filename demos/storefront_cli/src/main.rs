// storefront_cli/src/main.rs

// Declare modules for the application
mod commands;
mod config;
mod errors;

use crate::commands::Command;
use crate::config::AppConfig;
use crate::errors::{AppError, Result as AppResult}; // Use the app's Result alias

use cartstore::{CartStore, FileStorage, QuantityPolicy};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Drive the storefront cart from the command line.
#[derive(Debug, Parser)]
#[command(name = "storefront_cli", version, about)]
struct Cli {
  /// Directory holding the cart slot (overrides CART_STORAGE_DIR).
  #[arg(long, global = true)]
  storage_dir: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

fn init_tracing(json: bool) {
  // Default level INFO; RUST_LOG overrides. Logs go to stderr so stdout stays JSON.
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false);
  if json {
    builder.json().init();
  } else {
    builder.compact().init();
  }
}

fn run(cli: Cli, config: AppConfig) -> AppResult<String> {
  let storage_dir = cli.storage_dir.unwrap_or_else(|| config.storage_dir.clone());
  tracing::debug!(storage_dir = %storage_dir.display(), "Opening cart.");

  let cart = CartStore::open(FileStorage::new(storage_dir), config.cart_config());
  let policy = QuantityPolicy::from_config(cart.config());
  commands::run(cli.command, &cart, &policy)
}

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      eprintln!("{}", e);
      std::process::exit(e.exit_code());
    }
  };
  init_tracing(app_config.log_json);
  app_config.log_loaded();

  match run(cli, app_config) {
    Ok(output) => {
      println!("{}", output);
      Ok(())
    }
    Err(e @ (AppError::Validation(_) | AppError::Cart { .. })) => {
      tracing::error!(error = %e, "Command failed.");
      std::process::exit(e.exit_code());
    }
    Err(e) => Err(e.into()),
  }
}
