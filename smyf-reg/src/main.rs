//! smyf-reg - registration form service
//!
//! Serves the registration form, stores each submission in the embedded
//! SQLite store, and renders the stored rows as an HTML report.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use smyf_common::config::DatabasePathResolver;
use smyf_common::db::init_database;
use smyf_reg::{build_router, AppState};
use tracing::{info, warn};

/// Command-line arguments for smyf-reg
#[derive(Parser, Debug)]
#[command(name = "smyf-reg")]
#[command(about = "Registration form service")]
#[command(version)]
struct Args {
    /// Port to listen on (all interfaces)
    #[arg(short, long, default_value = "3000", env = "PORT")]
    port: u16,

    /// Path to the SQLite store file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Directory holding index.html and static assets
    #[arg(long, default_value = "public", env = "SMYF_PUBLIC_DIR")]
    public_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting smyf-reg v{}", env!("CARGO_PKG_VERSION"));

    let db_path = DatabasePathResolver::new(args.database).resolve();
    info!("Database path: {}", db_path.display());

    let (pool, status) = init_database(&db_path)
        .await
        .context("Failed to open database")?;
    if !status.all_ready() {
        warn!("Continuing with missing tables; affected requests will fail");
    }

    if !args.public_dir.join(smyf_reg::api::ui::INDEX_FILE).exists() {
        warn!(
            "No {} in {}",
            smyf_reg::api::ui::INDEX_FILE,
            args.public_dir.display()
        );
    }

    let state = AppState::new(pool, args.public_dir);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Server is running on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
