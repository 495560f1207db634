//! Album database operations
//!
//! An album row plus its `album_genres` links form one record; writes touch
//! both inside a single transaction.

use crate::db::models::{Album, AlbumDetail, AlbumListing, AlbumSummary};
use crate::db::{artists, genres};
use crate::uuid_utils;
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

fn summary_from_row(row: &SqliteRow) -> Result<AlbumSummary> {
    let guid_str: String = row.get("guid");

    Ok(AlbumSummary {
        guid: uuid_utils::from_column(&guid_str)?,
        title: row.get("title"),
        summary: row.get("summary"),
    })
}

async fn link_genres(
    tx: &mut Transaction<'_, Sqlite>,
    album_id: Uuid,
    genre_ids: &[Uuid],
) -> Result<()> {
    for genre_id in genre_ids {
        sqlx::query("INSERT OR IGNORE INTO album_genres (album_id, genre_id) VALUES (?, ?)")
            .bind(album_id.to_string())
            .bind(genre_id.to_string())
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

/// Insert a new album with its genre links
pub async fn insert_album(pool: &SqlitePool, album: &Album) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO albums (
            guid, title, summary, price, total_items, image, artist_id,
            created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(album.guid.to_string())
    .bind(&album.title)
    .bind(&album.summary)
    .bind(album.price)
    .bind(album.total_items)
    .bind(&album.image)
    .bind(album.artist_id.to_string())
    .execute(&mut *tx)
    .await?;

    link_genres(&mut tx, album.guid, &album.genre_ids).await?;

    tx.commit().await?;
    Ok(())
}

/// Load album by identity, references left as identities
pub async fn load_album(pool: &SqlitePool, guid: Uuid) -> Result<Option<Album>> {
    let row = sqlx::query(
        r#"
        SELECT guid, title, summary, price, total_items, image, artist_id
        FROM albums
        WHERE guid = ?
        "#,
    )
    .bind(guid.to_string())
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let genre_rows: Vec<String> = sqlx::query_scalar(
        "SELECT genre_id FROM album_genres WHERE album_id = ? ORDER BY genre_id",
    )
    .bind(guid.to_string())
    .fetch_all(pool)
    .await?;

    let guid_str: String = row.get("guid");
    let artist_str: String = row.get("artist_id");

    Ok(Some(Album {
        guid: uuid_utils::from_column(&guid_str)?,
        title: row.get("title"),
        summary: row.get("summary"),
        price: row.get("price"),
        total_items: row.get("total_items"),
        image: row.get("image"),
        artist_id: uuid_utils::from_column(&artist_str)?,
        genre_ids: genre_rows
            .iter()
            .map(|s| uuid_utils::from_column(s))
            .collect::<Result<Vec<_>>>()?,
    }))
}

/// Load album with its artist and genres populated
pub async fn load_album_detail(pool: &SqlitePool, guid: Uuid) -> Result<Option<AlbumDetail>> {
    let Some(album) = load_album(pool, guid).await? else {
        return Ok(None);
    };

    let (artist, genres) = tokio::try_join!(
        artists::load_artist(pool, album.artist_id),
        genres::list_genres_for_album(pool, album.guid),
    )?;

    let artist = artist.ok_or_else(|| {
        Error::Internal(format!(
            "album {} references missing artist {}",
            album.guid, album.artist_id
        ))
    })?;

    Ok(Some(AlbumDetail {
        album,
        artist,
        genres,
    }))
}

/// All albums ordered by title, each with its artist's name
pub async fn list_albums(pool: &SqlitePool) -> Result<Vec<AlbumListing>> {
    let rows = sqlx::query(
        r#"
        SELECT al.guid, al.title, al.artist_id, ar.name AS artist_name
        FROM albums al
        JOIN artists ar ON ar.guid = al.artist_id
        ORDER BY al.title COLLATE NOCASE ASC, al.guid ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let guid_str: String = row.get("guid");
            let artist_str: String = row.get("artist_id");
            Ok(AlbumListing {
                guid: uuid_utils::from_column(&guid_str)?,
                title: row.get("title"),
                artist_id: uuid_utils::from_column(&artist_str)?,
                artist_name: row.get("artist_name"),
            })
        })
        .collect()
}

/// Albums by one artist, ordered by title
pub async fn list_albums_by_artist(
    pool: &SqlitePool,
    artist_id: Uuid,
) -> Result<Vec<AlbumSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, title, summary
        FROM albums
        WHERE artist_id = ?
        ORDER BY title COLLATE NOCASE ASC, guid ASC
        "#,
    )
    .bind(artist_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(summary_from_row).collect()
}

/// Albums tagged with one genre, ordered by title
pub async fn list_albums_by_genre(
    pool: &SqlitePool,
    genre_id: Uuid,
) -> Result<Vec<AlbumSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT al.guid, al.title, al.summary
        FROM albums al
        JOIN album_genres ag ON ag.album_id = al.guid
        WHERE ag.genre_id = ?
        ORDER BY al.title COLLATE NOCASE ASC, al.guid ASC
        "#,
    )
    .bind(genre_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(summary_from_row).collect()
}

/// Replace every field and the genre set of an existing album
///
/// `Error::NotFound` when no album has this identity.
pub async fn update_album(pool: &SqlitePool, album: &Album) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE albums
        SET title = ?, summary = ?, price = ?, total_items = ?, image = ?,
            artist_id = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(&album.title)
    .bind(&album.summary)
    .bind(album.price)
    .bind(album.total_items)
    .bind(&album.image)
    .bind(album.artist_id.to_string())
    .bind(album.guid.to_string())
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        tx.rollback().await?;
        return Err(Error::NotFound(format!("album {}", album.guid)));
    }

    sqlx::query("DELETE FROM album_genres WHERE album_id = ?")
        .bind(album.guid.to_string())
        .execute(&mut *tx)
        .await?;
    link_genres(&mut tx, album.guid, &album.genre_ids).await?;

    tx.commit().await?;
    Ok(())
}

/// Delete album by identity; genre links go with it
pub async fn delete_album(pool: &SqlitePool, guid: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM albums WHERE guid = ?")
        .bind(guid.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_albums(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM albums")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::init_database;
    use crate::db::models::{Artist, Genre};

    async fn setup() -> (SqlitePool, Artist, Genre) {
        let pool = init_database("sqlite::memory:").await.unwrap();

        let artist = Artist::new("Rihanna".to_string(), None);
        artists::insert_artist(&pool, &artist).await.unwrap();
        let genre = Genre::new("Pop".to_string(), "Pop".to_string());
        genres::insert_genre(&pool, &genre).await.unwrap();

        (pool, artist, genre)
    }

    fn album(title: &str, artist: &Artist, genre: &Genre) -> Album {
        Album {
            guid: Uuid::new_v4(),
            title: title.to_string(),
            summary: "x".to_string(),
            price: 15,
            total_items: 21,
            image: None,
            artist_id: artist.guid,
            genre_ids: vec![genre.guid],
        }
    }

    #[tokio::test]
    async fn test_insert_and_populate() {
        let (pool, artist, genre) = setup().await;

        let anti = album("Anti", &artist, &genre);
        insert_album(&pool, &anti).await.unwrap();

        let detail = load_album_detail(&pool, anti.guid).await.unwrap().unwrap();
        assert_eq!(detail.album, anti);
        assert_eq!(detail.artist, artist);
        assert_eq!(detail.genres, vec![genre]);
    }

    #[tokio::test]
    async fn test_list_orders_by_title_with_artist_name() {
        let (pool, artist, genre) = setup().await;

        for title in ["Loud", "Anti", "Good Girl Gone Bad"] {
            insert_album(&pool, &album(title, &artist, &genre)).await.unwrap();
        }

        let listing = list_albums(&pool).await.unwrap();
        let titles: Vec<&str> = listing.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Anti", "Good Girl Gone Bad", "Loud"]);
        assert!(listing.iter().all(|a| a.artist_name == "Rihanna"));
    }

    #[tokio::test]
    async fn test_update_replaces_genres() {
        let (pool, artist, pop) = setup().await;
        let rnb = Genre::new("R&amp;B".to_string(), "R&amp;B".to_string());
        genres::insert_genre(&pool, &rnb).await.unwrap();

        let mut anti = album("Anti", &artist, &pop);
        insert_album(&pool, &anti).await.unwrap();

        anti.genre_ids = vec![rnb.guid];
        anti.price = 20;
        update_album(&pool, &anti).await.unwrap();

        let loaded = load_album(&pool, anti.guid).await.unwrap().unwrap();
        assert_eq!(loaded.genre_ids, vec![rnb.guid]);
        assert_eq!(loaded.price, 20);
        assert!(list_albums_by_genre(&pool, pop.guid).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_artist_with_albums_cannot_be_deleted() {
        let (pool, artist, genre) = setup().await;
        insert_album(&pool, &album("Anti", &artist, &genre)).await.unwrap();

        assert!(artists::delete_artist(&pool, artist.guid).await.is_err());
        assert_eq!(list_albums_by_artist(&pool, artist.guid).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_album_removes_links() {
        let (pool, artist, genre) = setup().await;
        let anti = album("Anti", &artist, &genre);
        insert_album(&pool, &anti).await.unwrap();

        assert!(delete_album(&pool, anti.guid).await.unwrap());
        assert!(load_album(&pool, anti.guid).await.unwrap().is_none());
        assert!(genres::delete_genre(&pool, genre.guid).await.unwrap());
    }

    #[tokio::test]
    async fn test_non_positive_price_rejected() {
        let (pool, artist, genre) = setup().await;
        let mut free = album("Free", &artist, &genre);
        free.price = 0;

        assert!(insert_album(&pool, &free).await.is_err());
        assert_eq!(count_albums(&pool).await.unwrap(), 0);
    }
}
