//! Tests for database initialization on first run and reopen

use catalog_common::db::artists::{insert_artist, load_artist};
use catalog_common::db::init::init_database;
use catalog_common::db::models::Artist;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("catalog.db");
    let url = format!("sqlite://{}?mode=rwc", db_path.display());

    let result = init_database(&url).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_reopen_keeps_records() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("catalog.db").display());

    let artist = Artist::new("Usher".to_string(), None);
    {
        let pool = init_database(&url).await.unwrap();
        insert_artist(&pool, &artist).await.unwrap();
        pool.close().await;
    }

    let pool = init_database(&url).await.expect("Failed to reopen existing database");
    let loaded = load_artist(&pool, artist.guid).await.unwrap();
    assert_eq!(loaded, Some(artist));
}
