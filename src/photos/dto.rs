use serde::Serialize;
use uuid::Uuid;

use crate::users::User;

/// Home page: the user with all their photos.
#[derive(Debug, Serialize)]
pub struct HomePage {
    pub page: &'static str,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct UploadPage {
    pub page: &'static str,
    pub user: SessionUser,
}
