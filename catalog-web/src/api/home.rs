//! Catalog home page

use axum::{
    extract::State,
    response::Redirect,
    routing::get,
    Router,
};
use maud::Markup;

use crate::error::ApiResult;
use crate::{views, AppState};

pub fn home_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/catalog", get(index))
}

/// GET /catalog
///
/// Store name plus album, artist, and genre counts.
pub async fn index(State(state): State<AppState>) -> ApiResult<Markup> {
    let counts = catalog_common::db::count_all(&state.db).await?;
    Ok(views::home::index(&state.store_name, &counts))
}
