//! Database initialization
//!
//! Opens (creating if needed) the catalog database and creates the tables
//! idempotently, so a fresh connection string is all the service or the
//! seed tool needs.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Current schema version, recorded in `schema_version`
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// Open a pool for `database_url` and create tables if needed
///
/// Accepts `sqlite://path/to/catalog.db?mode=rwc` style URLs and `sqlite::memory:`.
pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    let in_memory = database_url.contains(":memory:");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    if !in_memory {
        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    // An in-memory database lives only as long as its connection
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(10)
    };

    let pool = pool_options.connect_with(options).await?;

    if in_memory {
        info!("Opened in-memory database");
    } else {
        info!("Opened database: {}", database_url);
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all catalog tables (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_schema_version_table(pool).await?;
    create_artists_table(pool).await?;
    create_genres_table(pool).await?;
    create_albums_table(pool).await?;
    create_album_genres_table(pool).await?;

    sqlx::query("INSERT OR IGNORE INTO schema_version (version) VALUES (?)")
        .bind(CURRENT_SCHEMA_VERSION)
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_artists_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            image TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_artists_name ON artists(name)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_genres_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS genres (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL COLLATE NOCASE UNIQUE,
            description TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_albums_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS albums (
            guid TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            summary TEXT NOT NULL,
            price INTEGER NOT NULL,
            total_items INTEGER NOT NULL,
            image TEXT,
            artist_id TEXT NOT NULL REFERENCES artists(guid),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (price > 0),
            CHECK (total_items > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_albums_title ON albums(title)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_albums_artist ON albums(artist_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_album_genres_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS album_genres (
            album_id TEXT NOT NULL REFERENCES albums(guid) ON DELETE CASCADE,
            genre_id TEXT NOT NULL REFERENCES genres(guid),
            PRIMARY KEY (album_id, genre_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_album_genres_genre ON album_genres(genre_id)")
        .execute(pool)
        .await?;

    Ok(())
}
