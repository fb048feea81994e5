use anyhow::Context;
use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::users::{
    repo::{StoreError, StoreResult, UserStore},
    repo_types::{NewUser, Photo, User, UserRow},
};

/// Postgres-backed store. Photos live in a JSONB array on the user row.
#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, username, password_hash, photos
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await
        .context("find user by username")?;
        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, username, password_hash, photos
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(row.map(User::from))
    }

    async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        let res = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, name, username, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, username, password_hash, photos
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.name)
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .fetch_one(&self.db)
        .await;

        match res {
            Ok(row) => Ok(row.into()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::DuplicateUsername(new_user.username))
            }
            Err(e) => Err(anyhow::Error::new(e).context("insert user").into()),
        }
    }

    async fn append_photo(&self, user_id: Uuid, photo: Photo) -> StoreResult<()> {
        let done = sqlx::query(
            r#"
            UPDATE users
               SET photos = photos || $2
             WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(Json(vec![photo]))
        .execute(&self.db)
        .await
        .context("append photo")?;

        if done.rows_affected() == 0 {
            return Err(StoreError::UserNotFound(user_id));
        }
        Ok(())
    }
}
