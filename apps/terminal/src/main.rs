//! # Kirana Terminal Application
//!
//! Entry point for the `kirana` binary: a single-user, terminal-driven
//! retail management tool.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging, to stderr)
//! 2. Determine database path (platform data directory, env override)
//! 3. Connect to database & run migrations
//! 4. Enter the main menu loop
//!
//! The process exits 0 on explicit Exit; only a failed startup (database
//! unreachable) terminates with a non-zero code.

mod error;
mod input;
mod menu;

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kirana_db::{Database, DbConfig};

use error::AppError;

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    info!("Starting Kirana");

    let db_path = get_database_path()?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    info!("Database connected and migrations applied");

    menu::main_menu(&db).await?;

    db.close().await;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kirana=trace` - Show trace for kirana crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kirana=debug,sqlx=warn"));

    // Logs go to stderr so they never interleave with the menus on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.kirana.pos/kirana.db`
/// - **Windows**: `%APPDATA%\kirana\pos\kirana.db`
/// - **Linux**: `~/.local/share/kirana-pos/kirana.db`
///
/// ## Development Override
/// Set the `KIRANA_DB_PATH` environment variable to use a custom path.
fn get_database_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var("KIRANA_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "kirana", "pos")
        .ok_or_else(|| AppError::internal("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("kirana.db"))
}
