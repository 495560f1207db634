//! Entity schemas
//!
//! Text fields hold sanitized (escaped) values; see [`crate::sanitize`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::uuid_utils;

/// Display path of an artist
pub fn artist_url(guid: Uuid) -> String {
    format!("/catalog/artist/{}", guid)
}

/// Display path of an album
pub fn album_url(guid: Uuid) -> String {
    format!("/catalog/album/{}", guid)
}

/// Display path of a genre
pub fn genre_url(guid: Uuid) -> String {
    format!("/catalog/genre/{}", guid)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub guid: Uuid,
    pub name: String,
    /// Stored upload filename, served under `/images/`
    pub image: Option<String>,
}

impl Artist {
    pub fn new(name: String, image: Option<String>) -> Self {
        Self {
            guid: uuid_utils::generate(),
            name,
            image,
        }
    }

    pub fn url(&self) -> String {
        artist_url(self.guid)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub guid: Uuid,
    pub name: String,
    pub description: String,
}

impl Genre {
    pub fn new(name: String, description: String) -> Self {
        Self {
            guid: uuid_utils::generate(),
            name,
            description,
        }
    }

    pub fn url(&self) -> String {
        genre_url(self.guid)
    }
}

/// Album record with its references as identities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub guid: Uuid,
    pub title: String,
    pub summary: String,
    /// Whole currency units, always > 0
    pub price: i64,
    /// Copies in stock, always > 0
    pub total_items: i64,
    pub image: Option<String>,
    pub artist_id: Uuid,
    /// At least one genre
    pub genre_ids: Vec<Uuid>,
}

impl Album {
    pub fn url(&self) -> String {
        album_url(self.guid)
    }
}

/// Album row for the album list, with the artist's name joined in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlbumListing {
    pub guid: Uuid,
    pub title: String,
    pub artist_id: Uuid,
    pub artist_name: String,
}

impl AlbumListing {
    pub fn url(&self) -> String {
        album_url(self.guid)
    }

    pub fn artist_url(&self) -> String {
        artist_url(self.artist_id)
    }
}

/// Title and summary projection used wherever albums are listed as dependents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlbumSummary {
    pub guid: Uuid,
    pub title: String,
    pub summary: String,
}

impl AlbumSummary {
    pub fn url(&self) -> String {
        album_url(self.guid)
    }
}

/// Album with artist and genres populated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlbumDetail {
    pub album: Album,
    pub artist: Artist,
    pub genres: Vec<Genre>,
}

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub albums: i64,
    pub artists: i64,
    pub genres: i64,
}
