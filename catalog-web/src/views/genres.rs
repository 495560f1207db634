//! Genre pages

use catalog_common::db::{AlbumSummary, Genre};
use maud::{html, Markup};

use super::{error_list, layout, stored};
use crate::validation::FieldError;

#[derive(Debug, Clone, Default)]
pub struct GenreFormValues {
    pub name: String,
    pub description: String,
}

impl From<&Genre> for GenreFormValues {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
            description: genre.description.clone(),
        }
    }
}

pub fn list(genres: &[Genre]) -> Markup {
    layout(
        "Genre List",
        html! {
            @if genres.is_empty() {
                p { "There are no genres." }
            } @else {
                ul {
                    @for genre in genres {
                        li { a href=(genre.url()) { (stored(&genre.name)) } }
                    }
                }
            }
        },
    )
}

pub fn detail(genre: &Genre, albums: &[AlbumSummary]) -> Markup {
    layout(
        "Genre Detail",
        html! {
            h2 { (stored(&genre.name)) }
            p { (stored(&genre.description)) }
            h3 { "Albums" }
            @if albums.is_empty() {
                p { "This genre has no albums." }
            } @else {
                dl {
                    @for album in albums {
                        dt { a href=(album.url()) { (stored(&album.title)) } }
                        dd { (stored(&album.summary)) }
                    }
                }
            }
            hr;
            p { a href=(format!("{}/delete", genre.url())) { "Delete genre" } }
            p { a href=(format!("{}/update", genre.url())) { "Update genre" } }
        },
    )
}

pub fn form(title: &str, values: &GenreFormValues, errors: &[FieldError]) -> Markup {
    layout(
        title,
        html! {
            form method="POST" {
                div class="form-group" {
                    label for="name" { "Genre:" }
                    input id="name" type="text" name="name" placeholder="Hip Hop, Pop, R&B etc."
                        required value=(stored(&values.name));
                }
                div class="form-group" {
                    label for="description" { "Description:" }
                    textarea id="description" name="description" required {
                        (stored(&values.description))
                    }
                }
                button type="submit" { "Submit" }
            }
            (error_list(errors))
        },
    )
}

pub fn delete(genre: &Genre, albums: &[AlbumSummary], blocked: bool) -> Markup {
    layout(
        "Delete Genre",
        html! {
            h2 { (stored(&genre.name)) }
            @if !albums.is_empty() {
                @if blocked {
                    p.notice { "This genre was not deleted because albums still reference it." }
                }
                p { strong { "Remove this genre from the following albums before attempting to delete it." } }
                dl {
                    @for album in albums {
                        dt { a href=(album.url()) { (stored(&album.title)) } }
                        dd { (stored(&album.summary)) }
                    }
                }
            } @else {
                p { "Do you really want to delete this genre?" }
                form method="POST" {
                    input type="hidden" name="genreid" value=(genre.guid.to_string());
                    button type="submit" { "Delete" }
                }
            }
        },
    )
}
