//! Genre database operations

use crate::db::models::Genre;
use crate::uuid_utils;
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

fn genre_from_row(row: &SqliteRow) -> Result<Genre> {
    let guid_str: String = row.get("guid");

    Ok(Genre {
        guid: uuid_utils::from_column(&guid_str)?,
        name: row.get("name"),
        description: row.get("description"),
    })
}

pub async fn insert_genre(pool: &SqlitePool, genre: &Genre) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO genres (guid, name, description, created_at, updated_at)
        VALUES (?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(genre.guid.to_string())
    .bind(&genre.name)
    .bind(&genre.description)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn load_genre(pool: &SqlitePool, guid: Uuid) -> Result<Option<Genre>> {
    let row = sqlx::query("SELECT guid, name, description FROM genres WHERE guid = ?")
        .bind(guid.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(genre_from_row).transpose()
}

/// Case-insensitive lookup by name
pub async fn find_genre_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Genre>> {
    let row = sqlx::query(
        "SELECT guid, name, description FROM genres WHERE name = ? COLLATE NOCASE LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(genre_from_row).transpose()
}

/// All genres ordered by name
pub async fn list_genres(pool: &SqlitePool) -> Result<Vec<Genre>> {
    let rows = sqlx::query(
        "SELECT guid, name, description FROM genres ORDER BY name COLLATE NOCASE ASC, guid ASC",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(genre_from_row).collect()
}

/// Genres attached to an album, ordered by name
pub async fn list_genres_for_album(pool: &SqlitePool, album_id: Uuid) -> Result<Vec<Genre>> {
    let rows = sqlx::query(
        r#"
        SELECT g.guid, g.name, g.description
        FROM genres g
        JOIN album_genres ag ON ag.genre_id = g.guid
        WHERE ag.album_id = ?
        ORDER BY g.name COLLATE NOCASE ASC, g.guid ASC
        "#,
    )
    .bind(album_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(genre_from_row).collect()
}

/// Identities from `guids` that have no genre record
pub async fn missing_genres(pool: &SqlitePool, guids: &[Uuid]) -> Result<Vec<Uuid>> {
    let mut missing = Vec::new();
    for guid in guids {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM genres WHERE guid = ?)")
                .bind(guid.to_string())
                .fetch_one(pool)
                .await?;
        if !exists {
            missing.push(*guid);
        }
    }
    Ok(missing)
}

/// Replace name and description; `Error::NotFound` when no genre has this identity
pub async fn update_genre(pool: &SqlitePool, genre: &Genre) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE genres
        SET name = ?, description = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(&genre.name)
    .bind(&genre.description)
    .bind(genre.guid.to_string())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("genre {}", genre.guid)));
    }
    Ok(())
}

pub async fn delete_genre(pool: &SqlitePool, guid: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM genres WHERE guid = ?")
        .bind(guid.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_genres(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::init_database;

    #[tokio::test]
    async fn test_find_by_name_ignores_case() {
        let pool = init_database("sqlite::memory:").await.unwrap();

        let genre = Genre::new("Hip Hop".to_string(), "Beats and rhymes".to_string());
        insert_genre(&pool, &genre).await.unwrap();

        let found = find_genre_by_name(&pool, "hip hop").await.unwrap();
        assert_eq!(found, Some(genre));
        assert!(find_genre_by_name(&pool, "Jazz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected_by_schema() {
        let pool = init_database("sqlite::memory:").await.unwrap();

        insert_genre(&pool, &Genre::new("Pop".to_string(), "a".to_string()))
            .await
            .unwrap();
        let second = insert_genre(&pool, &Genre::new("Pop".to_string(), "b".to_string())).await;
        assert!(second.is_err());

        // Same rule the lookup uses: names differing only in case collide
        let shouted = insert_genre(&pool, &Genre::new("POP".to_string(), "c".to_string())).await;
        assert!(matches!(shouted, Err(Error::Database(_))));
        assert_eq!(count_genres(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_genre_is_not_found() {
        let pool = init_database("sqlite::memory:").await.unwrap();
        let ghost = Genre::new("Jazz".to_string(), "Swing".to_string());

        let err = update_genre(&pool, &ghost).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_genres() {
        let pool = init_database("sqlite::memory:").await.unwrap();

        let genre = Genre::new("R&amp;B".to_string(), "Rhythm and blues".to_string());
        insert_genre(&pool, &genre).await.unwrap();

        let unknown = Uuid::new_v4();
        let missing = missing_genres(&pool, &[genre.guid, unknown]).await.unwrap();
        assert_eq!(missing, vec![unknown]);
    }
}
