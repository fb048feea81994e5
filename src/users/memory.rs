use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::users::{
    repo::{StoreError, StoreResult, UserStore},
    repo_types::{NewUser, Photo, User},
};

/// Process-local store, used when no database is configured.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == new_user.username) {
            return Err(StoreError::DuplicateUsername(new_user.username));
        }
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            username: new_user.username,
            password_hash: new_user.password_hash,
            photos: Vec::new(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn append_photo(&self, user_id: Uuid, photo: Photo) -> StoreResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&user_id)
            .ok_or(StoreError::UserNotFound(user_id))?;
        user.photos.push(photo);
        Ok(())
    }
}
