//! Genre handlers
//!
//! Genre forms carry no file, so they are plain urlencoded posts.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use catalog_common::db::{albums, genres, Genre};
use maud::Markup;
use tracing::{info, warn};

use super::parse_id;
use crate::error::{ApiError, ApiResult};
use crate::validation::{FormInput, Validated, Validator};
use crate::views::genres::{self as view, GenreFormValues};
use crate::AppState;

const LIST_PATH: &str = "/catalog/genres";

pub fn genre_routes() -> Router<AppState> {
    Router::new()
        .route(LIST_PATH, get(genre_list))
        .route(
            "/catalog/genre/create",
            get(genre_create_get).post(genre_create_post),
        )
        .route("/catalog/genre/:id", get(genre_detail))
        .route(
            "/catalog/genre/:id/delete",
            get(genre_delete_get).post(genre_delete_post),
        )
        .route(
            "/catalog/genre/:id/update",
            get(genre_update_get).post(genre_update_post),
        )
}

fn genre_validator() -> Validator {
    Validator::new()
        .field("name", |f| {
            f.trim()
                .not_empty("Genre name must be specified.")
                .max_length(100, "Genre name must be at most 100 characters.")
                .escape()
        })
        .field("description", |f| {
            f.trim().not_empty("Description must be specified.").escape()
        })
}

fn echoed(checked: &Validated) -> GenreFormValues {
    GenreFormValues {
        name: checked.value("name").to_string(),
        description: checked.value("description").to_string(),
    }
}

fn not_found() -> ApiError {
    ApiError::NotFound("Genre not found".to_string())
}

/// GET /catalog/genres
pub async fn genre_list(State(state): State<AppState>) -> ApiResult<Markup> {
    let all = genres::list_genres(&state.db).await?;
    Ok(view::list(&all))
}

/// GET /catalog/genre/:id
pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Markup> {
    let id = parse_id(&id).ok_or_else(not_found)?;

    let (genre, albums) = tokio::try_join!(
        genres::load_genre(&state.db, id),
        albums::list_albums_by_genre(&state.db, id),
    )?;
    let genre = genre.ok_or_else(not_found)?;

    Ok(view::detail(&genre, &albums))
}

/// GET /catalog/genre/create
pub async fn genre_create_get() -> Markup {
    view::form("Create Genre", &GenreFormValues::default(), &[])
}

/// POST /catalog/genre/create
///
/// A name that already exists redirects to that genre instead of duplicating it.
pub async fn genre_create_post(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let checked = genre_validator().validate(&FormInput::from_pairs(fields));

    if !checked.is_valid() {
        return Ok(view::form("Create Genre", &echoed(&checked), checked.errors()).into_response());
    }

    if let Some(existing) = genres::find_genre_by_name(&state.db, checked.value("name")).await? {
        info!("Genre {} already exists, redirecting", existing.name);
        return Ok(Redirect::to(&existing.url()).into_response());
    }

    let genre = Genre::new(
        checked.value("name").to_string(),
        checked.value("description").to_string(),
    );
    genres::insert_genre(&state.db, &genre).await?;
    info!("Created genre {} ({})", genre.name, genre.guid);

    Ok(Redirect::to(&genre.url()).into_response())
}

/// GET /catalog/genre/:id/delete
pub async fn genre_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(Redirect::to(LIST_PATH).into_response());
    };

    let (genre, albums) = tokio::try_join!(
        genres::load_genre(&state.db, id),
        albums::list_albums_by_genre(&state.db, id),
    )?;

    match genre {
        Some(genre) => Ok(view::delete(&genre, &albums, false).into_response()),
        None => Ok(Redirect::to(LIST_PATH).into_response()),
    }
}

/// POST /catalog/genre/:id/delete
///
/// Refused while albums are tagged with the genre.
pub async fn genre_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(Redirect::to(LIST_PATH).into_response());
    };

    let (genre, albums) = tokio::try_join!(
        genres::load_genre(&state.db, id),
        albums::list_albums_by_genre(&state.db, id),
    )?;
    let Some(genre) = genre else {
        return Ok(Redirect::to(LIST_PATH).into_response());
    };

    if !albums.is_empty() {
        warn!(
            "Refused to delete genre {}: {} album(s) reference it",
            genre.guid,
            albums.len()
        );
        return Ok(view::delete(&genre, &albums, true).into_response());
    }

    genres::delete_genre(&state.db, genre.guid).await?;
    info!("Deleted genre {} ({})", genre.name, genre.guid);

    Ok(Redirect::to(LIST_PATH).into_response())
}

/// GET /catalog/genre/:id/update
pub async fn genre_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Markup> {
    let id = parse_id(&id).ok_or_else(not_found)?;
    let genre = genres::load_genre(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(view::form("Update Genre", &GenreFormValues::from(&genre), &[]))
}

/// POST /catalog/genre/:id/update
pub async fn genre_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(fields): Form<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let id = parse_id(&id).ok_or_else(not_found)?;
    let existing = genres::load_genre(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    let mut checked = genre_validator().validate(&FormInput::from_pairs(fields));

    if checked.is_valid() {
        if let Some(other) = genres::find_genre_by_name(&state.db, checked.value("name")).await? {
            if other.guid != existing.guid {
                checked.add_error("name", "A genre with this name already exists.");
            }
        }
    }

    if !checked.is_valid() {
        return Ok(view::form("Update Genre", &echoed(&checked), checked.errors()).into_response());
    }

    let genre = Genre {
        guid: existing.guid,
        name: checked.value("name").to_string(),
        description: checked.value("description").to_string(),
    };

    genres::update_genre(&state.db, &genre).await?;
    info!("Updated genre {} ({})", genre.name, genre.guid);

    Ok(Redirect::to(&genre.url()).into_response())
}
