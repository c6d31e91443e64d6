//! Housing Price API - Main Entry Point

use anyhow::Result;
use api::{init_logging, run_server, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    info!("=== Housing Price API v{} ===", env!("CARGO_PKG_VERSION"));
    let settings = Settings::load()?;
    run_server(&settings).await?;

    Ok(())
}
