//! Test Helper Utilities
//!
//! Builds the full router over an in-memory catalog and a temporary upload
//! directory, and drives it with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::path::PathBuf;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use catalog_common::db::{albums, artists, genres, init_database, Album, Artist, Genre};
use catalog_web::upload::UploadStore;
use catalog_web::{build_router, AppState};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt;
use uuid::Uuid;

const BOUNDARY: &str = "catalog-test-boundary";

/// Router plus the resources it points at
///
/// `_uploads_root` must outlive the test; dropping it removes the directory.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub upload_dir: PathBuf,
    _uploads_root: TempDir,
}

/// Status, redirect target and body text of one response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

/// File part for a multipart submission
pub struct TestFile<'a> {
    pub file_name: &'a str,
    pub bytes: &'a [u8],
}

pub async fn create_test_app() -> TestApp {
    let pool = init_database("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    let uploads_root = tempfile::tempdir().expect("Failed to create temp dir");
    let upload_dir = uploads_root.path().join("images");
    let uploads = UploadStore::new(&upload_dir);
    uploads.ensure_dir().expect("Failed to create upload dir");

    let router = build_router(AppState::new(pool.clone(), uploads, "Test Records"));

    TestApp {
        router,
        pool,
        upload_dir,
        _uploads_root: uploads_root,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// POST `application/x-www-form-urlencoded`
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", url_encode(k), url_encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// POST `multipart/form-data`, optionally with an `image` file part
    pub async fn post_multipart(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        file: Option<TestFile<'_>>,
    ) -> TestResponse {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(multipart_body(fields, file)))
                .unwrap(),
        )
        .await
    }

    /// Names of the files currently in the upload directory
    pub fn stored_files(&self) -> Vec<String> {
        std::fs::read_dir(&self.upload_dir)
            .expect("Upload dir missing")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    pub async fn add_artist(&self, name: &str) -> Artist {
        let artist = Artist::new(name.to_string(), None);
        artists::insert_artist(&self.pool, &artist).await.unwrap();
        artist
    }

    pub async fn add_genre(&self, name: &str) -> Genre {
        let genre = Genre::new(name.to_string(), format!("{} music", name));
        genres::insert_genre(&self.pool, &genre).await.unwrap();
        genre
    }

    pub async fn add_album(&self, title: &str, artist: &Artist, genre_ids: &[Uuid]) -> Album {
        let album = Album {
            guid: Uuid::new_v4(),
            title: title.to_string(),
            summary: format!("Summary of {}", title),
            price: 20,
            total_items: 5,
            image: None,
            artist_id: artist.guid,
            genre_ids: genre_ids.to_vec(),
        };
        albums::insert_album(&self.pool, &album).await.unwrap();
        album
    }
}

/// Identity at the end of a `/catalog/{kind}/{id}` redirect
pub fn redirect_id(response: &TestResponse) -> Uuid {
    let location = response.location.as_deref().expect("No Location header");
    let last = location.rsplit('/').next().unwrap();
    Uuid::parse_str(last).expect("Location does not end in an identity")
}

fn url_encode(value: &str) -> String {
    let mut out = String::new();
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

fn multipart_body(fields: &[(&str, &str)], file: Option<TestFile<'_>>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some(file) = file {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\n",
                file.file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(file.bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}
