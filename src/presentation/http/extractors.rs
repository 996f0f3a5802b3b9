// src/presentation/http/extractors.rs
use axum::{extract::FromRequestParts, http::request::Parts, Extension};
use chrono::Utc;
use headers::{Cookie, HeaderMapExt};

use crate::application::error::ApplicationError;
use crate::infrastructure::security::ADMIN_SESSION_COOKIE;
use crate::presentation::http::state::HttpState;

use super::error::HttpError;

/// Admin identity proven by a valid session cookie. Every back-office route
/// takes this extractor; rejection is a plain 401 with no cookie clearing.
#[derive(Debug, Clone)]
pub struct AdminAuthenticated {
    pub username: String,
}

impl FromRequestParts<()> for AdminAuthenticated {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &()) -> Result<Self, Self::Rejection> {
        let Extension(app_state) = Extension::<HttpState>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                HttpError::from_error(ApplicationError::Infrastructure(
                    "application state missing".into(),
                ))
            })?;

        let token = parts
            .headers
            .typed_get::<Cookie>()
            .and_then(|cookie| cookie.get(ADMIN_SESSION_COOKIE).map(str::to_string))
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::Unauthorized(
                    "missing admin session".into(),
                ))
            })?;

        let username = app_state
            .sessions
            .verify(&token, Utc::now())
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::Unauthorized(
                    "invalid or expired admin session".into(),
                ))
            })?;

        Ok(Self { username })
    }
}
