use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            FormPage, LoginForm, SignupForm, MSG_INVALID_CREDENTIALS, MSG_MISSING_FIELDS,
            MSG_USER_EXISTS,
        },
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        session::{clear_session, session_cookie},
    },
    error::AppError,
    state::AppState,
    users::{NewUser, StoreError},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", get(signup_page).post(signup))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
}

pub async fn signup_page() -> Json<FormPage> {
    Json(FormPage::signup(""))
}

pub async fn login_page() -> Json<FormPage> {
    Json(FormPage::login(""))
}

#[instrument(skip_all, fields(username = %form.username.trim()))]
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        warn!("signup with empty username or password");
        return Ok(Json(FormPage::signup(MSG_MISSING_FIELDS)).into_response());
    }

    if state.store.find_by_username(username).await?.is_some() {
        warn!("username already registered");
        return Ok(Json(FormPage::signup(MSG_USER_EXISTS)).into_response());
    }

    let password_hash = hash_password(&form.password)?;
    let new_user = NewUser {
        name: form.name.trim().to_string(),
        username: username.to_string(),
        password_hash,
    };

    match state.store.create_user(new_user).await {
        Ok(user) => {
            info!(user_id = %user.id, "user registered");
            Ok(Redirect::to("/login").into_response())
        }
        // another signup took the name after our lookup
        Err(StoreError::DuplicateUsername(_)) => {
            warn!("username registered concurrently");
            Ok(Json(FormPage::signup(MSG_USER_EXISTS)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

#[instrument(skip_all, fields(username = %form.username.trim()))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let user = match state.store.find_by_username(form.username.trim()).await? {
        Some(u) => u,
        None => {
            warn!("login unknown username");
            return Ok(Json(FormPage::login(MSG_INVALID_CREDENTIALS)).into_response());
        }
    };

    if !verify_password(&form.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Ok(Json(FormPage::login(MSG_INVALID_CREDENTIALS)).into_response());
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.issue(user.id, &user.username)?;

    info!(user_id = %user.id, "user logged in");
    Ok((jar.add(session_cookie(token)), Redirect::to("/")).into_response())
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (clear_session(jar), Redirect::to("/login"))
}
