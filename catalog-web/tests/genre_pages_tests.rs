//! Integration tests for the genre pages

mod helpers;

use axum::http::StatusCode;
use catalog_common::db::{count_all, genres};
use helpers::{create_test_app, redirect_id};

#[tokio::test]
async fn test_create_genre() {
    let app = create_test_app().await;

    let response = app
        .post_form(
            "/catalog/genre/create",
            &[("name", " Hip Hop "), ("description", "Rhythmic vocals over beats")],
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let genre = genres::load_genre(&app.pool, redirect_id(&response))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(genre.name, "Hip Hop");
    assert_eq!(genre.description, "Rhythmic vocals over beats");

    let detail = app.get(&genre.url()).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Hip Hop"));
    assert!(detail.body.contains("This genre has no albums."));
}

#[tokio::test]
async fn test_duplicate_name_redirects_to_existing() {
    let app = create_test_app().await;
    let pop = app.add_genre("Pop").await;

    let response = app
        .post_form(
            "/catalog/genre/create",
            &[("name", "pop"), ("description", "Another pop")],
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location, Some(pop.url()));
    assert_eq!(count_all(&app.pool).await.unwrap().genres, 1);
}

#[tokio::test]
async fn test_missing_fields_redisplay_form() {
    let app = create_test_app().await;

    let response = app
        .post_form("/catalog/genre/create", &[("name", "Jazz")])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Description must be specified."));
    assert!(response.body.contains("value=\"Jazz\""));
    assert_eq!(count_all(&app.pool).await.unwrap().genres, 0);

    let blank = app
        .post_form("/catalog/genre/create", &[("name", ""), ("description", "x")])
        .await;
    assert!(blank.body.contains("Genre name must be specified."));
}

#[tokio::test]
async fn test_update_to_taken_name_is_refused() {
    let app = create_test_app().await;
    app.add_genre("Pop").await;
    let rnb = app.add_genre("R&amp;B").await;

    let response = app
        .post_form(
            &format!("{}/update", rnb.url()),
            &[("name", "Pop"), ("description", "Clash")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("A genre with this name already exists."));

    let stored = genres::load_genre(&app.pool, rnb.guid).await.unwrap().unwrap();
    assert_eq!(stored.name, "R&amp;B");
}

#[tokio::test]
async fn test_blank_fields_on_update_redisplay_form() {
    let app = create_test_app().await;
    let genre = app.add_genre("Pop").await;
    let update = format!("{}/update", genre.url());

    let no_name = app
        .post_form(&update, &[("name", "  "), ("description", "Catchy")])
        .await;
    assert_eq!(no_name.status, StatusCode::OK);
    assert!(no_name.body.contains("Genre name must be specified."));
    assert!(no_name.body.contains("Catchy"));

    let no_description = app
        .post_form(&update, &[("name", "Pop"), ("description", "")])
        .await;
    assert_eq!(no_description.status, StatusCode::OK);
    assert!(no_description.body.contains("Description must be specified."));

    let stored = genres::load_genre(&app.pool, genre.guid).await.unwrap().unwrap();
    assert_eq!(stored.name, "Pop");
    assert_eq!(stored.description, "Pop music");
}

#[tokio::test]
async fn test_update_genre() {
    let app = create_test_app().await;
    let genre = app.add_genre("Hip Hop").await;

    let form = app.get(&format!("{}/update", genre.url())).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("Hip Hop music"));

    // Keeping its own name is not a collision
    let response = app
        .post_form(
            &format!("{}/update", genre.url()),
            &[("name", "Hip Hop"), ("description", "Rap and its offshoots")],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location, Some(genre.url()));

    let stored = genres::load_genre(&app.pool, genre.guid).await.unwrap().unwrap();
    assert_eq!(stored.description, "Rap and its offshoots");
}

#[tokio::test]
async fn test_delete_blocked_while_albums_use_genre() {
    let app = create_test_app().await;
    let artist = app.add_artist("Drake").await;
    let genre = app.add_genre("Hip Hop").await;
    app.add_album("For All the Dogs", &artist, &[genre.guid]).await;

    let detail = app.get(&genre.url()).await;
    assert!(detail.body.contains("For All the Dogs"));

    let response = app
        .post_form(&format!("{}/delete", genre.url()), &[])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .body
        .contains("This genre was not deleted because albums still reference it."));
    assert!(genres::load_genre(&app.pool, genre.guid)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_delete_unused_genre() {
    let app = create_test_app().await;
    let genre = app.add_genre("Pop").await;

    let confirm = app.get(&format!("{}/delete", genre.url())).await;
    assert!(confirm.body.contains("Do you really want to delete this genre?"));

    let response = app
        .post_form(&format!("{}/delete", genre.url()), &[])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/catalog/genres"));

    assert_eq!(app.get(&genre.url()).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_genres() {
    let app = create_test_app().await;

    let empty = app.get("/catalog/genres").await;
    assert!(empty.body.contains("There are no genres."));

    app.add_genre("Pop").await;
    app.add_genre("Hip Hop").await;

    let response = app.get("/catalog/genres").await;
    let hip_hop = response.body.find("Hip Hop").unwrap();
    let pop = response.body.find(">Pop<").unwrap();
    assert!(hip_hop < pop);
}
