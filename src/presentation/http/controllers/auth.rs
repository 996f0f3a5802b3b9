// src/presentation/http/controllers/auth.rs
use axum::{
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::error::ApplicationError;
use crate::infrastructure::security::ADMIN_SESSION_COOKIE;
use crate::presentation::http::error::{HttpError, HttpResult};
use crate::presentation::http::extractors::AdminAuthenticated;
use crate::presentation::http::state::HttpState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub username: String,
}

fn session_cookie(value: &str, max_age: i64) -> Result<HeaderValue, HttpError> {
    let cookie =
        format!("{ADMIN_SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
    HeaderValue::from_str(&cookie).map_err(|_| {
        HttpError::from_error(ApplicationError::infrastructure("cookie encoding failed"))
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session cookie issued.", body = SessionResponse),
        (status = 401, description = "Unknown credentials.")
    ),
    tag = "Auth"
)]
pub async fn login(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<LoginRequest>,
) -> HttpResult<(HeaderMap, Json<SessionResponse>)> {
    if !state
        .sessions
        .credentials_valid(&payload.username, &payload.password)
    {
        return Err(HttpError::from_error(ApplicationError::unauthorized(
            "invalid credentials",
        )));
    }

    let token = state
        .sessions
        .issue(&payload.username, Utc::now())
        .map_err(HttpError::from_error)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        session_cookie(&token, state.sessions.ttl_seconds())?,
    );
    Ok((
        headers,
        Json(SessionResponse {
            username: payload.username,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/logout",
    responses((status = 200, description = "Session cookie cleared.")),
    tag = "Auth"
)]
pub async fn logout() -> HttpResult<(HeaderMap, Json<serde_json::Value>)> {
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, session_cookie("", 0)?);
    Ok((headers, Json(serde_json::json!({ "status": "ok" }))))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/session",
    responses(
        (status = 200, description = "The authenticated admin.", body = SessionResponse),
        (status = 401, description = "No valid session cookie.")
    ),
    tag = "Auth"
)]
pub async fn session(admin: AdminAuthenticated) -> Json<SessionResponse> {
    Json(SessionResponse {
        username: admin.username,
    })
}
