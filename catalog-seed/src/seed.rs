//! Fixed starter catalog
//!
//! Steps run in dependency order (genres, artists, albums). Inserts within a
//! step run concurrently, and each step records what it created in
//! [`SeedKeys`] so later steps can resolve references by logical key.

use std::collections::HashMap;

use anyhow::{anyhow, bail, Context, Result};
use catalog_common::db::{albums, artists, count_all, genres, Album, Artist, Genre};
use catalog_common::sanitize::sanitize;
use catalog_common::uuid_utils;
use futures::future::try_join_all;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

/// Logical seed key to the identity created for it
#[derive(Debug, Default)]
pub struct SeedKeys {
    ids: HashMap<&'static str, Uuid>,
}

impl SeedKeys {
    pub fn insert(&mut self, key: &'static str, id: Uuid) {
        self.ids.insert(key, id);
    }

    pub fn get(&self, key: &str) -> Result<Uuid> {
        self.ids
            .get(key)
            .copied()
            .ok_or_else(|| anyhow!("seed key {key:?} was not created by an earlier step"))
    }
}

struct GenreSeed {
    key: &'static str,
    name: &'static str,
    description: &'static str,
}

struct ArtistSeed {
    key: &'static str,
    name: &'static str,
}

struct AlbumSeed {
    key: &'static str,
    title: &'static str,
    artist: &'static str,
    genres: &'static [&'static str],
    price: i64,
    total_items: i64,
    summary: &'static str,
}

const GENRES: &[GenreSeed] = &[
    GenreSeed {
        key: "hip-hop",
        name: "Hip Hop",
        description: "Hip Hop",
    },
    GenreSeed {
        key: "pop",
        name: "Pop",
        description: "Pop",
    },
    GenreSeed {
        key: "rnb",
        name: "R&B",
        description: "R&B",
    },
];

const ARTISTS: &[ArtistSeed] = &[
    ArtistSeed { key: "kanye", name: "Kanye West" },
    ArtistSeed { key: "drake", name: "Drake" },
    ArtistSeed { key: "taylor", name: "Taylor Swift" },
    ArtistSeed { key: "rihanna", name: "Rihanna" },
    ArtistSeed { key: "beyonce", name: "Beyonce" },
    ArtistSeed { key: "usher", name: "Usher" },
];

const ALBUMS: &[AlbumSeed] = &[
    AlbumSeed {
        key: "graduation",
        title: "Graduation",
        artist: "kanye",
        genres: &["hip-hop"],
        price: 18,
        total_items: 10,
        summary: "Kanye West's third studio album, 'Graduation,' diverges from his earlier soul and orchestral influences, embracing electronic sounds inspired by stadium tours, indie rock, and house music. Lyrically, West reflects on fame and media scrutiny while experimenting with synthesizer layering to craft a new sonic landscape.",
    },
    AlbumSeed {
        key: "for-all-the-dogs",
        title: "For All the Dogs",
        artist: "drake",
        genres: &["hip-hop"],
        price: 25,
        total_items: 14,
        summary: "Drake's eighth studio album, 'For All the Dogs,' was preceded by teasers linked to his book, 'Titles Ruin Everything,' and showcased a return to his classic style amid criticism of his previous house-influenced work.",
    },
    AlbumSeed {
        key: "midnights",
        title: "Midnights",
        artist: "taylor",
        genres: &["pop"],
        price: 30,
        total_items: 20,
        summary: "Taylor Swift's tenth studio album, 'Midnights,' was announced with a surprise reveal during her VMAs acceptance speech and features 13 tracks inspired by sleepless nights in her life, released in multiple cover variants including a special edition with Target.",
    },
    AlbumSeed {
        key: "anti",
        title: "Anti",
        artist: "rihanna",
        genres: &["pop"],
        price: 22,
        total_items: 9,
        summary: "Rihanna's eighth studio album 'Anti,' released in 2016 after a premature leak on TIDAL, showcases a departure from her pop and club sound, aiming for timeless, soulful music, embodying her desire for authenticity and defying expectations.",
    },
    AlbumSeed {
        key: "lemonade",
        title: "Lemonade",
        artist: "beyonce",
        genres: &["rnb"],
        price: 28,
        total_items: 12,
        summary: "'Lemonade' is a deeply personal testament describing Queen Bey's discovery that her husband had been unfaithful. During its twelve songs we accompany Beyoncé on her journey from denial and anger to emptiness and apathy, forgiveness and redemption. It's also a manifesto of personal creativity.",
    },
    AlbumSeed {
        key: "confessions",
        title: "Confessions",
        artist: "usher",
        genres: &["rnb"],
        price: 15,
        total_items: 7,
        summary: "This is Usher’s breakout, and considered by many his best album to date. The lead single, “Yeah!” is his most successful even today, and is just a taste of what this masterpiece has to offer.",
    },
];

/// Record counts written by one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub genres: usize,
    pub artists: usize,
    pub albums: usize,
}

/// Populate an empty catalog
///
/// Refuses to touch a catalog that already holds records.
pub async fn populate(pool: &SqlitePool) -> Result<SeedReport> {
    let existing = count_all(pool).await?;
    if existing.albums + existing.artists + existing.genres > 0 {
        bail!(
            "catalog already holds {} album(s), {} artist(s), {} genre(s); seed an empty database",
            existing.albums,
            existing.artists,
            existing.genres
        );
    }

    let mut keys = SeedKeys::default();

    let genres = create_genres(pool, &mut keys).await?;
    let artists = create_artists(pool, &mut keys).await?;
    let albums = create_albums(pool, &mut keys).await?;

    Ok(SeedReport {
        genres,
        artists,
        albums,
    })
}

async fn create_genres(pool: &SqlitePool, keys: &mut SeedKeys) -> Result<usize> {
    info!("Adding genres");

    let created = try_join_all(GENRES.iter().map(|seed| async move {
        let genre = Genre::new(sanitize(seed.name), sanitize(seed.description));
        genres::insert_genre(pool, &genre)
            .await
            .with_context(|| format!("Failed to add genre {}", seed.name))?;
        info!("Added genre: {}", seed.name);
        Ok::<_, anyhow::Error>((seed.key, genre.guid))
    }))
    .await?;

    record(keys, created)
}

async fn create_artists(pool: &SqlitePool, keys: &mut SeedKeys) -> Result<usize> {
    info!("Adding artists");

    let created = try_join_all(ARTISTS.iter().map(|seed| async move {
        let artist = Artist::new(sanitize(seed.name), None);
        artists::insert_artist(pool, &artist)
            .await
            .with_context(|| format!("Failed to add artist {}", seed.name))?;
        info!("Added artist: {}", seed.name);
        Ok::<_, anyhow::Error>((seed.key, artist.guid))
    }))
    .await?;

    record(keys, created)
}

async fn create_albums(pool: &SqlitePool, keys: &mut SeedKeys) -> Result<usize> {
    info!("Adding albums");

    // Resolve every reference before any album is written
    let records = ALBUMS
        .iter()
        .map(|seed| {
            let genre_ids = seed
                .genres
                .iter()
                .map(|g| keys.get(g))
                .collect::<Result<Vec<_>>>()?;

            Ok((
                seed.key,
                Album {
                    guid: uuid_utils::generate(),
                    title: sanitize(seed.title),
                    summary: sanitize(seed.summary),
                    price: seed.price,
                    total_items: seed.total_items,
                    image: None,
                    artist_id: keys.get(seed.artist)?,
                    genre_ids,
                },
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let created = try_join_all(records.into_iter().map(|(key, album)| async move {
        albums::insert_album(pool, &album)
            .await
            .with_context(|| format!("Failed to add album {}", key))?;
        info!("Added album: {}", album.title);
        Ok::<_, anyhow::Error>((key, album.guid))
    }))
    .await?;

    record(keys, created)
}

fn record(keys: &mut SeedKeys, created: Vec<(&'static str, Uuid)>) -> Result<usize> {
    let count = created.len();
    for (key, id) in created {
        keys.insert(key, id);
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_common::db::init_database;

    async fn memory_pool() -> SqlitePool {
        init_database("sqlite::memory:").await.unwrap()
    }

    #[test]
    fn test_seed_keys_report_missing_key() {
        let mut keys = SeedKeys::default();
        let id = Uuid::new_v4();
        keys.insert("pop", id);

        assert_eq!(keys.get("pop").unwrap(), id);
        assert!(keys.get("jazz").is_err());
    }

    #[test]
    fn test_album_references_name_seeded_keys() {
        for album in ALBUMS {
            assert!(ARTISTS.iter().any(|a| a.key == album.artist), "{}", album.key);
            assert!(!album.genres.is_empty(), "{}", album.key);
            for genre in album.genres {
                assert!(GENRES.iter().any(|g| g.key == *genre), "{}", album.key);
            }
            assert!(album.price > 0 && album.total_items > 0);
        }
    }

    #[tokio::test]
    async fn test_populate_empty_catalog() {
        let pool = memory_pool().await;

        let report = populate(&pool).await.unwrap();

        assert_eq!(
            report,
            SeedReport {
                genres: 3,
                artists: 6,
                albums: 6
            }
        );
        let counts = count_all(&pool).await.unwrap();
        assert_eq!((counts.genres, counts.artists, counts.albums), (3, 6, 6));
    }

    #[tokio::test]
    async fn test_seeded_text_is_sanitized_and_linked() {
        let pool = memory_pool().await;
        populate(&pool).await.unwrap();

        let rnb = genres::find_genre_by_name(&pool, "R&amp;B")
            .await
            .unwrap()
            .expect("R&B genre should be stored escaped");

        let listed = albums::list_albums_by_genre(&pool, rnb.guid).await.unwrap();
        let titles: Vec<_> = listed.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Confessions", "Lemonade"]);

        let lemonade = listed.iter().find(|a| a.title == "Lemonade").unwrap();
        assert!(lemonade.summary.starts_with("&#x27;Lemonade&#x27;"));
    }

    #[tokio::test]
    async fn test_populate_refuses_non_empty_catalog() {
        let pool = memory_pool().await;
        populate(&pool).await.unwrap();

        let err = populate(&pool).await.unwrap_err();

        assert!(err.to_string().contains("already holds"));
        assert_eq!(count_all(&pool).await.unwrap().albums, 6);
    }
}
