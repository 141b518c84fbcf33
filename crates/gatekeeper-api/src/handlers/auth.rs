//! Auth handlers: register, login, logout, refresh, me.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum_extra::extract::cookie::CookieJar;

use crate::cookies::{removal_cookie, session_cookie};
use crate::dto::request::{CredentialsRequest, RefreshRequest};
use crate::dto::response::{
    LoginResponse, LoginUser, MessageResponse, RefreshResponse, RegisterResponse, UserResponse,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let user = state.sessions.register(&req.user_name, &req.user_pass).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse::from_user(user, state.sessions.default_access_lifetime()),
        }),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<CredentialsRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let result = state.sessions.login(&req.user_name, &req.user_pass).await?;

    let jar = jar.add(session_cookie(
        &state.config.auth,
        result.access_token.clone(),
    ));
    Ok((
        jar,
        Json(LoginResponse {
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            user: LoginUser {
                id: result.user.id,
                username: result.user.login,
            },
            is_admin: result.user.is_admin,
        }),
    ))
}

/// GET /logout
///
/// Clears the session cookie. Works with or without a valid credential.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let caller = state.gateway.authenticate(&headers).await.ok();
    state.sessions.logout(caller.as_ref());

    (
        jar.add(removal_cookie(&state.config.auth)),
        Json(MessageResponse::new("Logged out successfully")),
    )
}

/// POST /refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<(CookieJar, Json<RefreshResponse>), ApiError> {
    let access_token = state.sessions.refresh(&req.refresh_token).await?;

    let jar = jar.add(session_cookie(&state.config.auth, access_token.clone()));
    Ok((
        jar,
        Json(RefreshResponse {
            access_token,
            token_type: "Bearer".to_string(),
        }),
    ))
}

/// GET /me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.sessions.profile(&auth).await?;
    Ok(Json(UserResponse::from_user(
        user,
        state.sessions.default_access_lifetime(),
    )))
}
