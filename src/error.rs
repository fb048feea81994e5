use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::users::StoreError;

/// Failures that end a request with a 500. Details go to the log only.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
    #[error("photo upload failed: {0:#}")]
    Upload(anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        Self::Internal(e.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        let body = match self {
            Self::Internal(_) => json!({ "message": "Internal server error" }),
            Self::Upload(_) => json!({ "error": "Error uploading photo" }),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
