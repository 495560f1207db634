//! Image uploads
//!
//! Artist and album forms are `multipart/form-data` with at most one file
//! part, named `image`. Extension checking happens here and nowhere else.
//! Files are written only once the rest of the submission has validated, and
//! are served back under [`PUBLIC_PATH`].

use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use thiserror::Error;
use catalog_common::uuid_utils;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::validation::FormInput;

/// Name of the single accepted file field
pub const IMAGE_FIELD: &str = "image";

/// URL prefix stored images are served from
pub const PUBLIC_PATH: &str = "/images";

/// Accepted extensions, compared case-insensitively
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Image must be a .jpg, .jpeg or .png file.")]
    DisallowedExtension(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// File part received but not yet stored
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Text fields and the optional image of one multipart submission
#[derive(Debug, Default)]
pub struct Submission {
    pub form: FormInput,
    pub image: Option<PendingUpload>,
}

/// Public URL of a stored image
pub fn image_url(stored_name: &str) -> String {
    format!("{}/{}", PUBLIC_PATH, stored_name)
}

/// Lowercased extension if it is on the allow-list
pub fn allowed_extension(file_name: &str) -> Result<String, UploadError> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(ext),
        _ => Err(UploadError::DisallowedExtension(file_name.to_string())),
    }
}

/// Directory holding uploaded images
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ensure_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }

    /// Check an upload without storing it
    pub fn accept(&self, upload: &PendingUpload) -> Result<(), UploadError> {
        allowed_extension(&upload.file_name).map(|_| ()).inspect_err(|_| {
            warn!("Rejected upload with disallowed name: {}", upload.file_name);
        })
    }

    /// Write the upload under a generated name and return that name
    pub async fn store(&self, upload: &PendingUpload) -> Result<String, UploadError> {
        let ext = allowed_extension(&upload.file_name)?;
        let stored_name = format!("{}.{}", uuid_utils::generate(), ext);

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&stored_name), &upload.bytes).await?;

        info!(
            "Stored upload {} as {} ({} bytes)",
            upload.file_name,
            stored_name,
            upload.bytes.len()
        );
        Ok(stored_name)
    }

    /// Delete a stored file whose record was never written
    ///
    /// Failure is logged and otherwise ignored.
    pub async fn remove(&self, stored_name: &str) {
        match tokio::fs::remove_file(self.dir.join(stored_name)).await {
            Ok(()) => info!("Removed orphaned upload {}", stored_name),
            Err(e) => warn!("Failed to remove upload {}: {}", stored_name, e),
        }
    }
}

/// Split a multipart body into text fields and the `image` file
///
/// An empty file input (no name, no bytes) counts as no file. A second image
/// part, or a file under any other name, is a bad request.
pub async fn read_multipart(mut multipart: Multipart) -> ApiResult<Submission> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        if let Some(file_name) = field.file_name().map(|s| s.to_string()) {
            if name != IMAGE_FIELD {
                return Err(ApiError::BadRequest(format!("Unexpected file field: {}", name)));
            }

            let bytes = field.bytes().await?;

            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            if submission.image.is_some() {
                return Err(ApiError::BadRequest("Only one image may be uploaded".to_string()));
            }

            submission.image = Some(PendingUpload {
                file_name,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field.text().await?;
            submission.form.push(name, value);
        }
    }

    Ok(submission)
}
