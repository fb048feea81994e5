use crate::state::AppState;
use axum::Router;

pub mod claims;
mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod session;

/// Name of the session cookie.
pub const AUTH_COOKIE: &str = "authToken";

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
