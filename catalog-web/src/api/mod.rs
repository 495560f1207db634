//! HTTP handlers for catalog-web
//!
//! One module per resource. Each resource answers the same eight requests:
//! list, detail, create form/submit, delete confirm/submit, update form/submit.

pub mod albums;
pub mod artists;
pub mod genres;
pub mod health;
pub mod home;

pub use albums::album_routes;
pub use artists::artist_routes;
pub use genres::genre_routes;
pub use health::health_routes;
pub use home::home_routes;

use uuid::Uuid;

use crate::error::ApiResult;
use crate::upload::{PendingUpload, UploadStore, IMAGE_FIELD};
use crate::validation::Validated;

/// Identity from a path segment; anything unparseable names no record
pub(crate) fn parse_id(raw: &str) -> Option<Uuid> {
    catalog_common::uuid_utils::parse(raw).ok()
}

/// Report a rejected upload as a field error on `image`
pub(crate) fn check_image(
    uploads: &UploadStore,
    image: Option<&PendingUpload>,
    checked: &mut Validated,
) {
    if let Some(upload) = image {
        if let Err(e) = uploads.accept(upload) {
            checked.add_error(IMAGE_FIELD, &e.to_string());
        }
    }
}

/// Store an accepted upload, returning its stored name
pub(crate) async fn store_image(
    uploads: &UploadStore,
    image: Option<&PendingUpload>,
) -> ApiResult<Option<String>> {
    match image {
        Some(upload) => Ok(Some(uploads.store(upload).await?)),
        None => Ok(None),
    }
}

/// Undo [`store_image`] when the record it was stored for was not written
pub(crate) async fn discard_image(uploads: &UploadStore, stored: Option<&str>) {
    if let Some(name) = stored {
        uploads.remove(name).await;
    }
}
