//! Artist handlers

use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use catalog_common::db::{albums, artists, Artist};
use maud::Markup;
use tracing::{info, warn};

use super::{check_image, discard_image, parse_id, store_image};
use crate::error::{ApiError, ApiResult};
use crate::upload::read_multipart;
use crate::validation::Validator;
use crate::views::artists::{self as view, ArtistFormValues};
use crate::AppState;

const LIST_PATH: &str = "/catalog/artists";

pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route(LIST_PATH, get(artist_list))
        .route(
            "/catalog/artist/create",
            get(artist_create_get).post(artist_create_post),
        )
        .route("/catalog/artist/:id", get(artist_detail))
        .route(
            "/catalog/artist/:id/delete",
            get(artist_delete_get).post(artist_delete_post),
        )
        .route(
            "/catalog/artist/:id/update",
            get(artist_update_get).post(artist_update_post),
        )
}

fn artist_validator() -> Validator {
    Validator::new().field("name", |f| {
        f.trim()
            .not_empty("Name must be specified.")
            .max_length(100, "Name must be at most 100 characters.")
            .escape()
    })
}

fn not_found() -> ApiError {
    ApiError::NotFound("Artist not found".to_string())
}

/// GET /catalog/artists
pub async fn artist_list(State(state): State<AppState>) -> ApiResult<Markup> {
    let all = artists::list_artists(&state.db).await?;
    Ok(view::list(&all))
}

/// GET /catalog/artist/:id
pub async fn artist_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Markup> {
    let id = parse_id(&id).ok_or_else(not_found)?;

    let (artist, albums) = tokio::try_join!(
        artists::load_artist(&state.db, id),
        albums::list_albums_by_artist(&state.db, id),
    )?;
    let artist = artist.ok_or_else(not_found)?;

    Ok(view::detail(&artist, &albums))
}

/// GET /catalog/artist/create
pub async fn artist_create_get() -> Markup {
    view::form("Create Artist", &ArtistFormValues::default(), &[])
}

/// POST /catalog/artist/create
pub async fn artist_create_post(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Response> {
    let submission = read_multipart(multipart).await?;
    let mut checked = artist_validator().validate(&submission.form);
    check_image(&state.uploads, submission.image.as_ref(), &mut checked);

    if !checked.is_valid() {
        let values = ArtistFormValues {
            name: checked.value("name").to_string(),
            image: None,
        };
        return Ok(view::form("Create Artist", &values, checked.errors()).into_response());
    }

    let image = store_image(&state.uploads, submission.image.as_ref()).await?;
    let artist = Artist::new(checked.value("name").to_string(), image);
    if let Err(e) = artists::insert_artist(&state.db, &artist).await {
        discard_image(&state.uploads, artist.image.as_deref()).await;
        return Err(e.into());
    }
    info!("Created artist {} ({})", artist.name, artist.guid);

    Ok(Redirect::to(&artist.url()).into_response())
}

/// GET /catalog/artist/:id/delete
///
/// Unknown artists go back to the list instead of a 404.
pub async fn artist_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(Redirect::to(LIST_PATH).into_response());
    };

    let (artist, albums) = tokio::try_join!(
        artists::load_artist(&state.db, id),
        albums::list_albums_by_artist(&state.db, id),
    )?;

    match artist {
        Some(artist) => Ok(view::delete(&artist, &albums, false).into_response()),
        None => Ok(Redirect::to(LIST_PATH).into_response()),
    }
}

/// POST /catalog/artist/:id/delete
///
/// Refused while albums reference the artist.
pub async fn artist_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(Redirect::to(LIST_PATH).into_response());
    };

    let (artist, albums) = tokio::try_join!(
        artists::load_artist(&state.db, id),
        albums::list_albums_by_artist(&state.db, id),
    )?;
    let Some(artist) = artist else {
        return Ok(Redirect::to(LIST_PATH).into_response());
    };

    if !albums.is_empty() {
        warn!(
            "Refused to delete artist {}: {} album(s) reference it",
            artist.guid,
            albums.len()
        );
        return Ok(view::delete(&artist, &albums, true).into_response());
    }

    artists::delete_artist(&state.db, artist.guid).await?;
    info!("Deleted artist {} ({})", artist.name, artist.guid);

    Ok(Redirect::to(LIST_PATH).into_response())
}

/// GET /catalog/artist/:id/update
pub async fn artist_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Markup> {
    let id = parse_id(&id).ok_or_else(not_found)?;
    let artist = artists::load_artist(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(view::form("Update Artist", &ArtistFormValues::from(&artist), &[]))
}

/// POST /catalog/artist/:id/update
///
/// Without a new file the current image is kept.
pub async fn artist_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Response> {
    let id = parse_id(&id).ok_or_else(not_found)?;
    let existing = artists::load_artist(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    let submission = read_multipart(multipart).await?;
    let mut checked = artist_validator().validate(&submission.form);
    check_image(&state.uploads, submission.image.as_ref(), &mut checked);

    if !checked.is_valid() {
        let values = ArtistFormValues {
            name: checked.value("name").to_string(),
            image: existing.image.clone(),
        };
        return Ok(view::form("Update Artist", &values, checked.errors()).into_response());
    }

    let stored = store_image(&state.uploads, submission.image.as_ref()).await?;
    let artist = Artist {
        guid: existing.guid,
        name: checked.value("name").to_string(),
        image: stored.clone().or(existing.image),
    };

    if let Err(e) = artists::update_artist(&state.db, &artist).await {
        discard_image(&state.uploads, stored.as_deref()).await;
        return Err(e.into());
    }
    info!("Updated artist {} ({})", artist.name, artist.guid);

    Ok(Redirect::to(&artist.url()).into_response())
}
