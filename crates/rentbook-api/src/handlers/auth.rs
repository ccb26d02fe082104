// ============================================================================
// Rentbook API - Auth Handlers
// File: crates/rentbook-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (register, login, logout, current user)

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rentbook_core::User;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::extract::{CurrentUser, ValidatedJson};
use crate::middleware::session_token;
use crate::response::ApiError;
use crate::state::AppState;

/// Credentials payload shared by register and login
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(length(min = 1, max = 64, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, max = 256, message = "Password is required"))]
    pub password: String,
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    let settings = &state.config.session;
    Cookie::build((settings.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure_cookie)
        .build()
}

fn expired_cookie(state: &AppState) -> Cookie<'static> {
    Cookie::build((state.config.session.cookie_name.clone(), ""))
        .path("/")
        .build()
}

/// Start a session for `user`, dropping any session the client already held.
fn start_session(state: &AppState, headers: &HeaderMap, jar: CookieJar, user: &User) -> CookieJar {
    if let Some(previous) = session_token(headers, &state.config.session.cookie_name) {
        state.sessions.revoke(&previous);
    }
    let token = state.sessions.create(user.id);
    jar.add(session_cookie(state, token))
}

/// Register handler - POST /api/register
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.auth.register(&payload.username, &payload.password).await?;
    let jar = start_session(&state, &headers, jar, &user);
    Ok((StatusCode::CREATED, jar, Json(user)))
}

/// Login handler - POST /api/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .auth
        .authenticate(&payload.username, &payload.password)
        .await?;
    let jar = start_session(&state, &headers, jar, &user);
    Ok((jar, Json(user)))
}

/// Logout handler - POST /api/logout
///
/// Always succeeds; an absent or stale session is simply cleared.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> impl IntoResponse {
    if let Some(token) = session_token(&headers, &state.config.session.cookie_name) {
        if state.sessions.revoke(&token) {
            info!("Session revoked on logout");
        }
    }
    (
        jar.remove(expired_cookie(&state)),
        Json(serde_json::json!({ "message": "Logged out" })),
    )
}

/// Current user - GET /api/user
pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}
