//! catalog-web - record store catalog server
//!
//! Resolves configuration, opens (and if needed creates) the catalog
//! database, then serves the catalog pages until Ctrl+C or SIGTERM.

use std::path::PathBuf;

use anyhow::{Context, Result};
use catalog_common::config::{CatalogConfig, ConfigOverrides};
use catalog_common::db::init_database;
use catalog_web::upload::UploadStore;
use catalog_web::{build_router, AppState};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments; each one overrides its CATALOG_* variable
#[derive(Parser, Debug)]
#[command(name = "catalog-web")]
#[command(about = "Record store catalog web server")]
#[command(version)]
struct Args {
    /// SQLite connection string (e.g. sqlite://catalog.db)
    #[arg(long)]
    database_url: Option<String>,

    /// Address to listen on (e.g. 127.0.0.1:3000)
    #[arg(long)]
    bind: Option<String>,

    /// Directory uploaded images are written to
    #[arg(long)]
    upload_dir: Option<PathBuf>,

    /// Store name shown on the home page
    #[arg(long)]
    store_name: Option<String>,

    /// Path to config.toml
    #[arg(long, env = "CATALOG_CONFIG")]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            database_url: self.database_url.clone(),
            bind: self.bind.clone(),
            upload_dir: self.upload_dir.clone(),
            store_name: self.store_name.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catalog_web=info,tower_http=info")),
        )
        .init();

    // Build identification goes out before any database work
    info!(
        "Starting catalog-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = CatalogConfig::load(args.overrides(), args.config.as_deref())
        .context("Failed to load configuration")?;

    info!("Database: {}", config.database_url);
    info!("Upload directory: {}", config.upload_dir.display());

    let pool = match init_database(&config.database_url).await {
        Ok(pool) => {
            info!("Connected to catalog database");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    let uploads = UploadStore::new(&config.upload_dir);
    uploads
        .ensure_dir()
        .with_context(|| format!("Failed to create {}", config.upload_dir.display()))?;

    let app = build_router(AppState::new(pool, uploads, config.store_name.clone()));

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;
    info!("catalog-web listening on http://{}", config.bind);
    info!("Health check: http://{}/health", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
