use async_trait::async_trait;
use uuid::Uuid;

use crate::users::repo_types::{NewUser, Photo, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("username {0:?} is already taken")]
    DuplicateUsername(String),
    #[error("user {0} not found")]
    UserNotFound(Uuid),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for users and their embedded photos.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact-match lookup by username.
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Insert a user with an empty photo list. Fails with
    /// [`StoreError::DuplicateUsername`] if the username already exists.
    async fn create_user(&self, new_user: NewUser) -> StoreResult<User>;

    /// Append `photo` to the end of the user's photo list.
    async fn append_photo(&self, user_id: Uuid, photo: Photo) -> StoreResult<()>;
}
