use time::OffsetDateTime;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::users::{Photo, StoreError, UserStore};

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("user {0} not found")]
    UserNotFound(Uuid),
    #[error("store error: {0}")]
    Storage(#[source] StoreError),
}

/// Append a photo record to the owner's collection.
///
/// The caller has already authenticated `user_id`; this only checks that the
/// user record still exists. A user removed between lookup and append is
/// reported as [`RegisterError::UserNotFound`] and no photo is written.
pub async fn register_photo(
    store: &dyn UserStore,
    user_id: Uuid,
    caption: Option<String>,
    filename: String,
) -> Result<Photo, RegisterError> {
    if store
        .find_by_id(user_id)
        .await
        .map_err(RegisterError::Storage)?
        .is_none()
    {
        warn!(%user_id, "photo for unknown user");
        return Err(RegisterError::UserNotFound(user_id));
    }

    let photo = Photo {
        caption,
        filename,
        uploaded_at: OffsetDateTime::now_utc(),
    };

    match store.append_photo(user_id, photo.clone()).await {
        Ok(()) => {
            debug!(%user_id, filename = %photo.filename, "photo registered");
            Ok(photo)
        }
        Err(StoreError::UserNotFound(id)) => Err(RegisterError::UserNotFound(id)),
        Err(e) => Err(RegisterError::Storage(e)),
    }
}
