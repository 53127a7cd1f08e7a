//! Swiss Rents HTTP Server Binary
//!
//! Loads the configured dataset once, sets up the HTTP router, and starts
//! serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin swiss-rents-server
//!
//! # Absolute rent buckets on another listing file
//! SWISS_RENTS_BUCKETING=absolute SWISS_RENTS_LISTINGS=/data/rents.csv \
//!   cargo run --bin swiss-rents-server
//! ```
//!
//! # Environment Variables
//!
//! - `SWISS_RENTS_CONFIG`: TOML configuration file
//! - `SWISS_RENTS_LISTINGS` / `SWISS_RENTS_BOUNDARIES`: source files
//! - `SWISS_RENTS_BUCKETING`: `absolute` | `rate` (default: rate)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use swiss_rents::config::AppConfig;
use swiss_rents::http::{create_router, AppState};
use swiss_rents::store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Swiss Rents HTTP Server");

    let config = AppConfig::load()?;
    let sources = config.data_sources();
    info!(
        "Loading listings from {} and boundaries from {} ({} buckets)",
        sources.listings_path.display(),
        sources.boundaries_path.display(),
        sources.policy
    );

    // Any load error ends the process here.
    let dataset = store::load_cached(&sources)?;
    let summary = dataset.metadata.summary;
    info!(
        "Dataset loaded: {} listings kept of {} rows ({} incomplete, {} invalid), {} boundaries",
        summary.kept,
        summary.rows_read,
        summary.incomplete,
        summary.invalid,
        dataset.metadata.boundary_count
    );

    let app = create_router(AppState::new(dataset));

    let addr: SocketAddr = config.bind_address().parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
