use anyhow::Context;
use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use bytes::Bytes;
use tracing::{info, instrument, warn};

use super::{
    dto::{HomePage, SessionUser, UploadPage},
    services::register_photo,
};
use crate::{
    auth::{extractors::AuthUser, session::clear_session},
    error::AppError,
    state::AppState,
    storage::unique_filename,
};

/// Multipart field carrying the image.
const UPLOAD_FIELD: &str = "imageUpload";
const UPLOAD_LIMIT: usize = 20 * 1024 * 1024; // 20MB

pub fn photo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/uploadPhoto", get(upload_page).post(upload_photo))
        .layer(DefaultBodyLimit::max(UPLOAD_LIMIT))
}

#[instrument(skip_all, fields(user_id = %claims.sub))]
pub async fn home(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    match state.store.find_by_id(claims.sub).await? {
        Some(user) => Ok(Json(HomePage {
            page: "userPage",
            user,
        })
        .into_response()),
        None => {
            warn!("session for a user that no longer exists");
            Ok((clear_session(jar), Redirect::to("/login")).into_response())
        }
    }
}

pub async fn upload_page(AuthUser(claims): AuthUser) -> Json<UploadPage> {
    Json(UploadPage {
        page: "uploadPhoto",
        user: SessionUser {
            id: claims.sub,
            username: claims.username,
        },
    })
}

struct UploadForm {
    caption: Option<String>,
    original_name: String,
    content_type: String,
    body: Bytes,
}

async fn read_upload_form(mp: &mut Multipart) -> anyhow::Result<UploadForm> {
    let mut caption = None;
    let mut file = None;
    while let Some(field) = mp.next_field().await.context("read multipart field")? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("caption") => {
                let text = field.text().await.context("read caption")?;
                caption = Some(text).filter(|t| !t.trim().is_empty());
            }
            Some(UPLOAD_FIELD) => {
                let original_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".into());
                let body = field.bytes().await.context("read image")?;
                file = Some((original_name, content_type, body));
            }
            _ => {}
        }
    }

    let (original_name, content_type, body) =
        file.with_context(|| format!("{UPLOAD_FIELD} file is missing"))?;
    anyhow::ensure!(!body.is_empty(), "uploaded file is empty");
    Ok(UploadForm {
        caption,
        original_name,
        content_type,
        body,
    })
}

#[instrument(skip_all, fields(user_id = %claims.sub))]
pub async fn upload_photo(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    mp: Result<Multipart, MultipartRejection>,
) -> Result<Redirect, AppError> {
    let mut mp =
        mp.map_err(|e| AppError::Upload(anyhow::anyhow!("not a multipart body: {e}")))?;
    let form = read_upload_form(&mut mp).await.map_err(AppError::Upload)?;

    let filename = unique_filename(&form.original_name);
    state
        .storage
        .put_object(&filename, form.body, &form.content_type)
        .await
        .map_err(AppError::Upload)?;

    match register_photo(state.store.as_ref(), claims.sub, form.caption, filename.clone()).await {
        Ok(photo) => {
            info!(filename = %photo.filename, "photo uploaded");
            Ok(Redirect::to("/"))
        }
        Err(e) => {
            if let Err(cleanup) = state.storage.delete_object(&filename).await {
                warn!(error = %cleanup, %filename, "failed to remove orphaned upload");
            }
            Err(AppError::Upload(e.into()))
        }
    }
}
