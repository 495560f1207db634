//! Artist database operations

use crate::db::models::Artist;
use crate::uuid_utils;
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

fn artist_from_row(row: &SqliteRow) -> Result<Artist> {
    let guid_str: String = row.get("guid");

    Ok(Artist {
        guid: uuid_utils::from_column(&guid_str)?,
        name: row.get("name"),
        image: row.get("image"),
    })
}

/// Insert a new artist
pub async fn insert_artist(pool: &SqlitePool, artist: &Artist) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO artists (guid, name, image, created_at, updated_at)
        VALUES (?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(artist.guid.to_string())
    .bind(&artist.name)
    .bind(&artist.image)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load artist by identity
pub async fn load_artist(pool: &SqlitePool, guid: Uuid) -> Result<Option<Artist>> {
    let row = sqlx::query("SELECT guid, name, image FROM artists WHERE guid = ?")
        .bind(guid.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(artist_from_row).transpose()
}

/// All artists ordered by name
pub async fn list_artists(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let rows = sqlx::query(
        "SELECT guid, name, image FROM artists ORDER BY name COLLATE NOCASE ASC, guid ASC",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(artist_from_row).collect()
}

/// Replace every field of an existing artist
///
/// `Error::NotFound` when no artist has this identity.
pub async fn update_artist(pool: &SqlitePool, artist: &Artist) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE artists
        SET name = ?, image = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.image)
    .bind(artist.guid.to_string())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {}", artist.guid)));
    }
    Ok(())
}

/// Delete artist by identity
///
/// Fails with a foreign key violation while albums still reference the artist.
pub async fn delete_artist(pool: &SqlitePool, guid: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM artists WHERE guid = ?")
        .bind(guid.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_artists(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn artist_exists(pool: &SqlitePool, guid: Uuid) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE guid = ?)")
        .bind(guid.to_string())
        .fetch_one(pool)
        .await?;
    Ok(exists)
}
