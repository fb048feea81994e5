use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use tracing::warn;

use super::{claims::Claims, jwt::JwtKeys, AUTH_COOKIE};

/// Identity of the logged-in user, taken from the session cookie.
///
/// No cookie redirects to `/login`. A cookie that fails verification is a
/// client error and gets `401`.
pub struct AuthUser(pub Claims);

#[derive(Debug)]
pub enum AuthRejection {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::MissingToken => Redirect::to("/login").into_response(),
            Self::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Invalid token" })),
            )
                .into_response(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = match jar.get(AUTH_COOKIE) {
            Some(c) if !c.value().is_empty() => c.value(),
            _ => return Err(AuthRejection::MissingToken),
        };

        let keys = JwtKeys::from_ref(state);
        match keys.verify(token) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(e) => {
                warn!(error = %e, "invalid or expired session token");
                Err(AuthRejection::InvalidToken)
            }
        }
    }
}
