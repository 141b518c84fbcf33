//! The session cookie carrying the access token.

use axum_extra::extract::cookie::{Cookie, SameSite};

use gatekeeper_core::config::AuthConfig;

/// An HTTP-only, SameSite=Strict cookie holding `token`.
pub fn session_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(config.cookie_secure)
        .build()
}

/// A cookie that removes the session cookie from the client.
pub fn removal_cookie(config: &AuthConfig) -> Cookie<'static> {
    let mut cookie = session_cookie(config, String::new());
    cookie.make_removal();
    cookie
}
