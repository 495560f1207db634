//! Database models and queries

pub mod albums;
pub mod artists;
pub mod genres;
pub mod init;
pub mod models;

pub use init::*;
pub use models::*;

use crate::Result;
use sqlx::SqlitePool;

/// Count albums, artists and genres concurrently
pub async fn count_all(pool: &SqlitePool) -> Result<CatalogCounts> {
    let (albums, artists, genres) = tokio::try_join!(
        albums::count_albums(pool),
        artists::count_artists(pool),
        genres::count_genres(pool),
    )?;

    Ok(CatalogCounts {
        albums,
        artists,
        genres,
    })
}
