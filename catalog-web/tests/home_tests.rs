//! Integration tests for the home page and health endpoint

mod helpers;

use axum::http::StatusCode;
use helpers::create_test_app;

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app().await;

    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "catalog-web");
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let app = create_test_app().await;

    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/catalog"));
}

#[tokio::test]
async fn test_home_shows_counts() {
    let app = create_test_app().await;
    let artist = app.add_artist("Kanye West").await;
    let genre = app.add_genre("Hip Hop").await;
    app.add_album("Graduation", &artist, &[genre.guid]).await;
    app.add_artist("Drake").await;

    let response = app.get("/catalog").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Test Records"));
    assert!(response.body.contains("Albums: </strong>1"));
    assert!(response.body.contains("Artists: </strong>2"));
    assert!(response.body.contains("Genres: </strong>1"));
}

#[tokio::test]
async fn test_unknown_image_is_404() {
    let app = create_test_app().await;

    let response = app.get("/images/missing.png").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
