//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ip_intel` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Wiring the gateway, store and session into the interactive loop
//!
//! All core functionality is implemented in the library crate.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;

use ip_intel::app::{print_lookup_statistics, run_repl};
use ip_intel::initialization::{init_client, init_logger_with};
use ip_intel::{
    Config, GatewayClient, GeminiCompleter, LookupStats, SessionController, SqliteStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;
    log::debug!("Starting with {:?}", config);

    if config.api_key.is_empty() {
        log::warn!("No API key configured (set API_KEY or --api-key); lookups will fail");
    }

    let client = init_client().context("Failed to initialize HTTP client")?;
    let completer = GeminiCompleter::from_config(client, &config);
    let stats = Arc::new(LookupStats::new());
    let gateway = GatewayClient::new(Arc::new(completer)).with_stats(Arc::clone(&stats));

    let store = SqliteStore::open(&config.db_path)
        .await
        .with_context(|| format!("Failed to open database at {}", config.db_path.display()))?;
    let session = SessionController::initialize(gateway, Arc::new(store)).await;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_repl(&session, stdin, &mut stdout)
        .await
        .context("Terminal I/O failed")?;

    print_lookup_statistics(&stats);
    println!(
        "{} lookup{} this session ({} succeeded, {} failed)",
        stats.successes() + stats.total_failures(),
        if stats.successes() + stats.total_failures() == 1 { "" } else { "s" },
        stats.successes(),
        stats.total_failures()
    );
    Ok(())
}
