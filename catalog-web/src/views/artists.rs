//! Artist pages

use catalog_common::db::{AlbumSummary, Artist};
use maud::{html, Markup};

use super::{cover_image, error_list, layout, stored};
use crate::validation::FieldError;

/// Values echoed into the artist form
#[derive(Debug, Clone, Default)]
pub struct ArtistFormValues {
    pub name: String,
    /// Image currently on record (update form only)
    pub image: Option<String>,
}

impl From<&Artist> for ArtistFormValues {
    fn from(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            image: artist.image.clone(),
        }
    }
}

pub fn list(artists: &[Artist]) -> Markup {
    layout(
        "Artist List",
        html! {
            @if artists.is_empty() {
                p { "There are no artists." }
            } @else {
                ul {
                    @for artist in artists {
                        li { a href=(artist.url()) { (stored(&artist.name)) } }
                    }
                }
            }
        },
    )
}

pub fn detail(artist: &Artist, albums: &[AlbumSummary]) -> Markup {
    layout(
        "Artist Detail",
        html! {
            h2 { (stored(&artist.name)) }
            (cover_image(artist.image.as_deref(), &artist.name))
            h3 { "Albums" }
            @if albums.is_empty() {
                p { "This artist has no albums." }
            } @else {
                dl {
                    @for album in albums {
                        dt { a href=(album.url()) { (stored(&album.title)) } }
                        dd { (stored(&album.summary)) }
                    }
                }
            }
            hr;
            p { a href=(format!("{}/delete", artist.url())) { "Delete artist" } }
            p { a href=(format!("{}/update", artist.url())) { "Update artist" } }
        },
    )
}

pub fn form(title: &str, values: &ArtistFormValues, errors: &[FieldError]) -> Markup {
    layout(
        title,
        html! {
            form method="POST" enctype="multipart/form-data" {
                div class="form-group" {
                    label for="name" { "Name:" }
                    input id="name" type="text" name="name" placeholder="Artist name"
                        required value=(stored(&values.name));
                }
                div class="form-group" {
                    label for="image" { "Image (.jpg, .jpeg, .png):" }
                    (cover_image(values.image.as_deref(), &values.name))
                    input id="image" type="file" name="image" accept=".jpg,.jpeg,.png";
                }
                button type="submit" { "Submit" }
            }
            (error_list(errors))
        },
    )
}

/// Delete confirmation; with albums present the delete is refused
///
/// `blocked` is set when the page answers a refused delete submission.
pub fn delete(artist: &Artist, albums: &[AlbumSummary], blocked: bool) -> Markup {
    layout(
        "Delete Artist",
        html! {
            h2 { (stored(&artist.name)) }
            @if !albums.is_empty() {
                @if blocked {
                    p.notice { "This artist was not deleted because albums still reference it." }
                }
                p { strong { "Delete the following albums before attempting to delete this artist." } }
                h3 { "Albums" }
                dl {
                    @for album in albums {
                        dt { a href=(album.url()) { (stored(&album.title)) } }
                        dd { (stored(&album.summary)) }
                    }
                }
            } @else {
                p { "Do you really want to delete this artist?" }
                form method="POST" {
                    input type="hidden" name="artistid" value=(artist.guid.to_string());
                    button type="submit" { "Delete" }
                }
            }
        },
    )
}
