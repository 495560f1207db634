//! Album handlers
//!
//! Albums reference one artist and one or more genres. Reference lists for
//! the form's selection inputs are fetched concurrently, and submitted
//! references are checked against the store before anything is written.

use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use catalog_common::db::{albums, artists, genres, Album};
use catalog_common::uuid_utils;
use maud::Markup;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use super::{check_image, discard_image, parse_id, store_image};
use crate::error::{ApiError, ApiResult};
use crate::upload::read_multipart;
use crate::validation::{Validated, Validator};
use crate::views::albums::{self as view, AlbumChoices, AlbumFormValues};
use crate::AppState;

const LIST_PATH: &str = "/catalog/albums";

pub fn album_routes() -> Router<AppState> {
    Router::new()
        .route(LIST_PATH, get(album_list))
        .route(
            "/catalog/album/create",
            get(album_create_get).post(album_create_post),
        )
        .route("/catalog/album/:id", get(album_detail))
        .route(
            "/catalog/album/:id/delete",
            get(album_delete_get).post(album_delete_post),
        )
        .route(
            "/catalog/album/:id/update",
            get(album_update_get).post(album_update_post),
        )
}

fn album_validator() -> Validator {
    Validator::new()
        .field("title", |f| f.trim().not_empty("Title must not be empty.").escape())
        .field("artist", |f| {
            f.trim()
                .not_empty("Artist must be specified.")
                .identity("Artist must be specified.")
                .escape()
        })
        .field("summary", |f| f.trim().not_empty("Summary must not be empty.").escape())
        .field("price", |f| {
            f.trim()
                .positive_int("Price must be a positive whole number.")
                .escape()
        })
        .field("total_items", |f| {
            f.trim()
                .positive_int("Total items must be a positive whole number.")
                .escape()
        })
        .field("genre", |f| {
            f.trim()
                .not_empty("At least one genre must be selected.")
                .identity("Selected genre does not exist.")
                .escape()
        })
}

/// Add field errors for references that name no stored record
async fn check_references(db: &SqlitePool, checked: &mut Validated) -> ApiResult<()> {
    if !checked.has_error("artist") {
        if let Some(artist_id) = checked.identity("artist") {
            if !artists::artist_exists(db, artist_id).await? {
                checked.add_error("artist", "Selected artist does not exist.");
            }
        }
    }

    if !checked.has_error("genre") {
        let genre_ids = checked.identities("genre");
        if !genres::missing_genres(db, &genre_ids).await?.is_empty() {
            checked.add_error("genre", "Selected genre does not exist.");
        }
    }

    Ok(())
}

fn echoed(checked: &Validated, image: Option<String>) -> AlbumFormValues {
    AlbumFormValues {
        title: checked.value("title").to_string(),
        artist: checked
            .identity("artist")
            .map(|id| id.to_string())
            .unwrap_or_else(|| checked.value("artist").to_string()),
        summary: checked.value("summary").to_string(),
        price: checked.value("price").to_string(),
        total_items: checked.value("total_items").to_string(),
        genres: checked
            .values("genre")
            .into_iter()
            .map(|v| Uuid::parse_str(v).map_or_else(|_| v.to_string(), |id| id.to_string()))
            .collect(),
        image,
    }
}

/// Build the record from a submission that passed validation
fn album_from(checked: &Validated, guid: Uuid, image: Option<String>) -> ApiResult<Album> {
    let missing = |field: &str| ApiError::Internal(format!("validated album lacks {}", field));

    Ok(Album {
        guid,
        title: checked.value("title").to_string(),
        summary: checked.value("summary").to_string(),
        price: checked.int("price").ok_or_else(|| missing("price"))?,
        total_items: checked.int("total_items").ok_or_else(|| missing("total_items"))?,
        image,
        artist_id: checked.identity("artist").ok_or_else(|| missing("artist"))?,
        genre_ids: checked.identities("genre"),
    })
}

/// Render the album form with the artist and genre lists
async fn render_form(
    db: &SqlitePool,
    title: &str,
    values: &AlbumFormValues,
    checked: Option<&Validated>,
) -> ApiResult<Markup> {
    let (all_artists, all_genres) =
        tokio::try_join!(artists::list_artists(db), genres::list_genres(db))?;

    let choices = AlbumChoices {
        artists: &all_artists,
        genres: &all_genres,
    };
    let errors = checked.map(|c| c.errors()).unwrap_or(&[]);

    Ok(view::form(title, values, &choices, errors))
}

fn not_found() -> ApiError {
    ApiError::NotFound("Album not found".to_string())
}

/// GET /catalog/albums
///
/// Ordered by title, each with its artist's name.
pub async fn album_list(State(state): State<AppState>) -> ApiResult<Markup> {
    let all = albums::list_albums(&state.db).await?;
    Ok(view::list(&all))
}

/// GET /catalog/album/:id
pub async fn album_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Markup> {
    let id = parse_id(&id).ok_or_else(not_found)?;
    let detail = albums::load_album_detail(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(view::detail(&detail))
}

/// GET /catalog/album/create
pub async fn album_create_get(State(state): State<AppState>) -> ApiResult<Markup> {
    render_form(&state.db, "Create Album", &AlbumFormValues::default(), None).await
}

/// POST /catalog/album/create
pub async fn album_create_post(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Response> {
    let submission = read_multipart(multipart).await?;
    let mut checked = album_validator().validate(&submission.form);
    check_references(&state.db, &mut checked).await?;
    check_image(&state.uploads, submission.image.as_ref(), &mut checked);

    if !checked.is_valid() {
        let values = echoed(&checked, None);
        let page = render_form(&state.db, "Create Album", &values, Some(&checked)).await?;
        return Ok(page.into_response());
    }

    let image = store_image(&state.uploads, submission.image.as_ref()).await?;
    let album = album_from(&checked, uuid_utils::generate(), image)?;
    if let Err(e) = albums::insert_album(&state.db, &album).await {
        discard_image(&state.uploads, album.image.as_deref()).await;
        return Err(e.into());
    }
    info!("Created album {} ({})", album.title, album.guid);

    Ok(Redirect::to(&album.url()).into_response())
}

/// GET /catalog/album/:id/delete
pub async fn album_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(Redirect::to(LIST_PATH).into_response());
    };

    match albums::load_album_detail(&state.db, id).await? {
        Some(detail) => Ok(view::delete(&detail).into_response()),
        None => Ok(Redirect::to(LIST_PATH).into_response()),
    }
}

/// POST /catalog/album/:id/delete
///
/// Albums have no dependents; the delete always goes through.
pub async fn album_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(Redirect::to(LIST_PATH).into_response());
    };

    if albums::delete_album(&state.db, id).await? {
        info!("Deleted album {}", id);
    }

    Ok(Redirect::to(LIST_PATH).into_response())
}

/// GET /catalog/album/:id/update
pub async fn album_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Markup> {
    let id = parse_id(&id).ok_or_else(not_found)?;

    let (album, all_artists, all_genres) = tokio::try_join!(
        albums::load_album(&state.db, id),
        artists::list_artists(&state.db),
        genres::list_genres(&state.db),
    )?;
    let album = album.ok_or_else(not_found)?;

    let choices = AlbumChoices {
        artists: &all_artists,
        genres: &all_genres,
    };
    Ok(view::form(
        "Update Album",
        &AlbumFormValues::from(&album),
        &choices,
        &[],
    ))
}

/// POST /catalog/album/:id/update
///
/// Replaces every field and the genre set; without a new file the current
/// cover is kept.
pub async fn album_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Response> {
    let id = parse_id(&id).ok_or_else(not_found)?;
    let existing = albums::load_album(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    let submission = read_multipart(multipart).await?;
    let mut checked = album_validator().validate(&submission.form);
    check_references(&state.db, &mut checked).await?;
    check_image(&state.uploads, submission.image.as_ref(), &mut checked);

    if !checked.is_valid() {
        let values = echoed(&checked, existing.image.clone());
        let page = render_form(&state.db, "Update Album", &values, Some(&checked)).await?;
        return Ok(page.into_response());
    }

    let stored = store_image(&state.uploads, submission.image.as_ref()).await?;
    let album = album_from(&checked, existing.guid, stored.clone().or(existing.image))?;

    if let Err(e) = albums::update_album(&state.db, &album).await {
        discard_image(&state.uploads, stored.as_deref()).await;
        return Err(e.into());
    }
    info!("Updated album {} ({})", album.title, album.guid);

    Ok(Redirect::to(&album.url()).into_response())
}
