//! HTML views rendered with Maud
//!
//! Catalog text is stored already escaped (see `catalog_common::sanitize`),
//! so stored fields are emitted through [`stored`] instead of Maud's own
//! escaping. Literal strings and error messages go through normal escaping.

pub mod albums;
pub mod artists;
pub mod genres;
pub mod home;

use axum::http::StatusCode;
use maud::{html, Markup, PreEscaped, Render, DOCTYPE};

use crate::upload::image_url;
use crate::validation::FieldError;

const STYLE: &str = r#"
body { font-family: system-ui, -apple-system, sans-serif; margin: 0; display: flex; }
nav { width: 200px; padding: 20px; background: #f5f5f5; min-height: 100vh; }
nav ul { list-style: none; padding: 0; }
nav li { margin: 8px 0; }
main { padding: 20px 40px; max-width: 900px; }
h1 { color: #333; border-bottom: 2px solid #0066cc; padding-bottom: 10px; }
.errors { color: #b00020; }
.form-group { margin-bottom: 12px; }
.form-group label { display: block; font-weight: bold; }
.cover { max-width: 240px; }
.notice { background: #fff4e5; padding: 10px; border-left: 4px solid #ff9800; }
"#;

/// Emit text that was sanitized before it was stored
pub fn stored(text: &str) -> PreEscaped<&str> {
    PreEscaped(text)
}

/// Page shell shared by every view
pub fn layout(title: impl Render, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                nav {
                    ul {
                        li { a href="/catalog" { "Home" } }
                        li { a href="/catalog/albums" { "All albums" } }
                        li { a href="/catalog/artists" { "All artists" } }
                        li { a href="/catalog/genres" { "All genres" } }
                    }
                    hr;
                    ul {
                        li { a href="/catalog/album/create" { "Create new album" } }
                        li { a href="/catalog/artist/create" { "Create new artist" } }
                        li { a href="/catalog/genre/create" { "Create new genre" } }
                    }
                }
                main {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}

/// Violation list shown above a redisplayed form
pub fn error_list(errors: &[FieldError]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul.errors {
                @for error in errors {
                    li data-field=(error.field) { (error.message) }
                }
            }
        }
    }
}

pub fn cover_image(image: Option<&str>, alt: &str) -> Markup {
    html! {
        @if let Some(name) = image {
            img.cover src=(image_url(name)) alt=(stored(alt));
        }
    }
}

/// Generic error page for request-terminating errors
pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let heading = status.canonical_reason().unwrap_or("Error");
    layout(
        heading,
        html! {
            p { (message) }
            p.status { (status.as_u16()) }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_text_not_escaped_twice() {
        let page = layout("T", html! { p { (stored("R&amp;B")) } }).into_string();
        assert!(page.contains("<p>R&amp;B</p>"));
    }

    #[test]
    fn test_literal_text_is_escaped() {
        let page = error_page(StatusCode::NOT_FOUND, "<nope>").into_string();
        assert!(page.contains("&lt;nope&gt;"));
        assert!(page.contains("Not Found"));
    }

    #[test]
    fn test_error_list_empty_renders_nothing() {
        assert_eq!(error_list(&[]).into_string(), "");
    }
}
