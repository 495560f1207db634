//! catalog-web library - record store catalog
//!
//! Server-rendered pages for browsing and editing artists, albums and
//! genres, plus the uploaded cover images they reference.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use sqlx::SqlitePool;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod upload;
pub mod validation;
pub mod views;

pub use error::{ApiError, ApiResult};

use upload::UploadStore;

/// Largest accepted request body (multipart uploads included)
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog database connection pool
    pub db: SqlitePool,
    /// Where uploaded images are written and served from
    pub uploads: UploadStore,
    /// Shown on the catalog home page
    pub store_name: String,
}

impl AppState {
    pub fn new(db: SqlitePool, uploads: UploadStore, store_name: impl Into<String>) -> Self {
        Self {
            db,
            uploads,
            store_name: store_name.into(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let images = ServeDir::new(state.uploads.dir());

    Router::new()
        .merge(api::home_routes())
        .merge(api::artist_routes())
        .merge(api::album_routes())
        .merge(api::genre_routes())
        .merge(api::health_routes())
        .nest_service(upload::PUBLIC_PATH, images)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
