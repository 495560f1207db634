//! populatedb - fill an empty catalog database with starter records
//!
//! Usage: `populatedb sqlite://catalog.db?mode=rwc`

use anyhow::{Context, Result};
use catalog_common::db::init_database;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod seed;

#[derive(Parser, Debug)]
#[command(name = "populatedb")]
#[command(about = "Insert starter genres, artists and albums into a catalog database")]
#[command(version)]
struct Args {
    /// SQLite connection string of the catalog to populate
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catalog_seed=info,catalog_common=info")),
        )
        .init();

    let args = Args::parse();

    info!("Connecting to {}", args.database_url);
    let pool = init_database(&args.database_url)
        .await
        .with_context(|| format!("Failed to open {}", args.database_url))?;

    let report = seed::populate(&pool).await?;

    info!(
        "Seed complete: {} genre(s), {} artist(s), {} album(s)",
        report.genres, report.artists, report.albums
    );

    pool.close().await;
    Ok(())
}
