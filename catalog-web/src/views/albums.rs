//! Album pages

use catalog_common::db::{Album, AlbumDetail, AlbumListing, Artist, Genre};
use maud::{html, Markup};

use super::{cover_image, error_list, layout, stored};
use crate::validation::FieldError;

/// Values echoed into the album form
///
/// Numbers stay as text so a rejected entry is shown exactly as sanitized.
#[derive(Debug, Clone, Default)]
pub struct AlbumFormValues {
    pub title: String,
    pub artist: String,
    pub summary: String,
    pub price: String,
    pub total_items: String,
    pub genres: Vec<String>,
    pub image: Option<String>,
}

impl From<&Album> for AlbumFormValues {
    fn from(album: &Album) -> Self {
        Self {
            title: album.title.clone(),
            artist: album.artist_id.to_string(),
            summary: album.summary.clone(),
            price: album.price.to_string(),
            total_items: album.total_items.to_string(),
            genres: album.genre_ids.iter().map(|g| g.to_string()).collect(),
            image: album.image.clone(),
        }
    }
}

/// Reference lists that populate the form's selection inputs
pub struct AlbumChoices<'a> {
    pub artists: &'a [Artist],
    pub genres: &'a [Genre],
}

pub fn list(albums: &[AlbumListing]) -> Markup {
    layout(
        "Album List",
        html! {
            @if albums.is_empty() {
                p { "There are no albums." }
            } @else {
                ul {
                    @for album in albums {
                        li {
                            a href=(album.url()) { (stored(&album.title)) }
                            " (" a href=(album.artist_url()) { (stored(&album.artist_name)) } ")"
                        }
                    }
                }
            }
        },
    )
}

pub fn detail(detail: &AlbumDetail) -> Markup {
    let album = &detail.album;
    layout(
        stored(&album.title),
        html! {
            (cover_image(album.image.as_deref(), &album.title))
            p {
                strong { "Artist: " }
                a href=(detail.artist.url()) { (stored(&detail.artist.name)) }
            }
            p { strong { "Summary: " } (stored(&album.summary)) }
            p { strong { "Price: " } "$" (album.price) }
            p { strong { "In stock: " } (album.total_items) }
            p {
                strong { "Genre: " }
                @for (i, genre) in detail.genres.iter().enumerate() {
                    @if i > 0 { ", " }
                    a href=(genre.url()) { (stored(&genre.name)) }
                }
            }
            hr;
            p { a href=(format!("{}/delete", album.url())) { "Delete album" } }
            p { a href=(format!("{}/update", album.url())) { "Update album" } }
        },
    )
}

pub fn form(
    title: &str,
    values: &AlbumFormValues,
    choices: &AlbumChoices<'_>,
    errors: &[FieldError],
) -> Markup {
    layout(
        title,
        html! {
            form method="POST" enctype="multipart/form-data" {
                div class="form-group" {
                    label for="title" { "Title:" }
                    input id="title" type="text" name="title" placeholder="Name of album"
                        required value=(stored(&values.title));
                }
                div class="form-group" {
                    label for="artist" { "Artist:" }
                    select id="artist" name="artist" required {
                        option value="" { "--Please select an artist--" }
                        @for artist in choices.artists {
                            @let id = artist.guid.to_string();
                            option value=(id) selected[values.artist == id] {
                                (stored(&artist.name))
                            }
                        }
                    }
                }
                div class="form-group" {
                    label for="summary" { "Summary:" }
                    textarea id="summary" name="summary" placeholder="Summary" required {
                        (stored(&values.summary))
                    }
                }
                div class="form-group" {
                    label for="price" { "Price:" }
                    input id="price" type="number" name="price" min="1" step="1"
                        required value=(stored(&values.price));
                }
                div class="form-group" {
                    label for="total_items" { "Total items:" }
                    input id="total_items" type="number" name="total_items" min="1" step="1"
                        required value=(stored(&values.total_items));
                }
                div class="form-group" {
                    label { "Genre:" }
                    @for genre in choices.genres {
                        @let id = genre.guid.to_string();
                        div {
                            input type="checkbox" name="genre" id=(id) value=(id)
                                checked[values.genres.contains(&id)];
                            label for=(id) { (stored(&genre.name)) }
                        }
                    }
                }
                div class="form-group" {
                    label for="image" { "Cover image (.jpg, .jpeg, .png):" }
                    (cover_image(values.image.as_deref(), &values.title))
                    input id="image" type="file" name="image" accept=".jpg,.jpeg,.png";
                }
                button type="submit" { "Submit" }
            }
            (error_list(errors))
        },
    )
}

pub fn delete(detail: &AlbumDetail) -> Markup {
    let album = &detail.album;
    layout(
        "Delete Album",
        html! {
            h2 { (stored(&album.title)) }
            p { strong { "Artist: " } (stored(&detail.artist.name)) }
            p { "Do you really want to delete this album?" }
            form method="POST" {
                input type="hidden" name="albumid" value=(album.guid.to_string());
                button type="submit" { "Delete" }
            }
        },
    )
}
