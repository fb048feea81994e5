use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::AUTH_COOKIE;

/// Session cookie holding a signed token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .path("/")
        .build()
}

/// Adds an expired session cookie so the browser drops its copy.
///
/// The server keeps no revocation list: a token copied before this point
/// stays valid until its `exp`.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    let mut cookie = session_cookie(String::new());
    cookie.make_removal();
    jar.add(cookie)
}
