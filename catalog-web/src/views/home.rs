use catalog_common::db::CatalogCounts;
use maud::{html, Markup};

use super::layout;

pub fn index(store_name: &str, counts: &CatalogCounts) -> Markup {
    layout(
        store_name,
        html! {
            p { "Welcome to " em { (store_name) } ", a small record store catalog." }
            h2 { "Dynamic content" }
            p { "The catalog has the following record counts:" }
            ul {
                li { strong { "Albums: " } (counts.albums) }
                li { strong { "Artists: " } (counts.artists) }
                li { strong { "Genres: " } (counts.genres) }
            }
        },
    )
}
