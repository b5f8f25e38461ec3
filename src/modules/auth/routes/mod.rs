//! HTTP handlers for the auth module: signup, login, logout, session check.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use time::OffsetDateTime;
use uuid::Uuid;

use folio_authz::{guard::credential_token, AuthContext, CurrentUser, User};
use folio_http::AppError;
use folio_store::StoreError;

use super::models::{AuthResponse, LoginRequest, SignupRequest, UserProjection};

pub async fn signup(
    State(ctx): State<AuthContext>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = required(payload.username)?;
    let email = required(payload.email)?;
    let password = required(payload.password)?;

    let user = User {
        id: Uuid::now_v7(),
        password_digest: AuthContext::digest(&username, &password),
        username,
        email,
        created_at: OffsetDateTime::now_utc(),
    };

    let stored = ctx.users.insert(user).map_err(|err| match err {
        StoreError::Duplicate { .. } => AppError::conflict("Username or email already in use"),
        other => other.into(),
    })?;

    tracing::info!(user_id = %stored.id, username = %stored.username, "account created");

    let token = ctx.sessions.open(stored.id);
    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, session_cookie(&ctx.cookie_name, &token))],
        Json(AuthResponse {
            message: "Account created successfully",
            user: UserProjection::from(&stored),
        }),
    ))
}

pub async fn login(
    State(ctx): State<AuthContext>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = required(payload.username)?;
    let password = required(payload.password)?;

    let user = ctx
        .users
        .find(|user| user.username == username)
        .into_iter()
        .next()
        .filter(|user| user.password_digest == AuthContext::digest(&username, &password))
        .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

    let token = ctx.sessions.open(user.id);
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&ctx.cookie_name, &token))],
        Json(AuthResponse {
            message: "Logged in successfully",
            user: UserProjection::from(&user),
        }),
    ))
}

pub async fn logout(
    State(ctx): State<AuthContext>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = credential_token(&headers, &ctx.cookie_name) {
        ctx.sessions.revoke(&token);
    }

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, clear_cookie(&ctx.cookie_name))],
        Json(json!({ "message": "Logged out successfully" })),
    ))
}

pub async fn check(user: CurrentUser) -> Json<UserProjection> {
    Json(UserProjection {
        id: user.id,
        username: user.username,
        email: user.email,
    })
}

fn required(field: Option<String>) -> Result<String, AppError> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::validation("All fields are required"))
}

fn session_cookie(name: &str, token: &str) -> String {
    format!("{name}={token}; Path=/; HttpOnly; SameSite=Lax")
}

fn clear_cookie(name: &str) -> String {
    format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
