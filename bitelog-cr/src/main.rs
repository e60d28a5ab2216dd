//! bitelog-cr (Community Reviews) - Review reconciliation service
//!
//! Serves aggregated community statistics for a restaurant identified by a
//! platform place id, a free-text name, or both. Read-only over the shared
//! BiteLog database; the main application owns all writes.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use bitelog_common::{config, db};
use bitelog_cr::{build_router, AppState};

/// Fixed loopback port for the community review service
const PORT: u16 = 5733;

#[derive(Debug, Parser)]
#[command(name = "bitelog-cr", about = "BiteLog community review service")]
struct Args {
    /// Data folder holding bitelog.db (overrides env and config file)
    #[arg(long)]
    data_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber before anything else
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting BiteLog Community Reviews (bitelog-cr) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();

    let data_folder = config::resolve_data_folder(args.data_folder.as_deref(), "BITELOG_DATA");
    let db_path = config::database_path(&data_folder);
    info!("Database path: {}", db_path.display());

    // The engine never writes, so connect read-only
    let pool = db::connect_readonly(&db_path).await?;
    info!("✓ Connected to database (read-only)");

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", PORT)).await?;
    info!("bitelog-cr listening on http://127.0.0.1:{}", PORT);
    info!("Health check: http://127.0.0.1:{}/health", PORT);

    axum::serve(listener, app).await?;

    Ok(())
}
