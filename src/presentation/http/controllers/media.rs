// src/presentation/http/controllers/media.rs
use axum::{extract::Multipart, Extension, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::error::ApplicationError;
use crate::presentation::http::error::{HttpError, HttpResult};
use crate::presentation::http::extractors::AdminAuthenticated;
use crate::presentation::http::state::HttpState;

const DEFAULT_FOLDER: &str = "autoescuelas";

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadedImageResponse {
    pub url: String,
    pub public_id: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/media",
    responses(
        (status = 200, description = "Image stored externally; only the URL is kept.", body = UploadedImageResponse),
        (status = 400, description = "Multipart body without a file part.")
    ),
    tag = "Admin"
)]
pub async fn upload_image(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    mut multipart: Multipart,
) -> HttpResult<Json<UploadedImageResponse>> {
    let mut file: Option<(Vec<u8>, String)> = None;
    let mut folder = DEFAULT_FOLDER.to_string();

    while let Some(field) = multipart.next_field().await.map_err(|err| {
        HttpError::from_error(ApplicationError::validation(format!(
            "unreadable multipart body: {err}"
        )))
    })? {
        match field.name() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .unwrap_or("upload")
                    .to_string();
                let bytes = field.bytes().await.map_err(|err| {
                    HttpError::from_error(ApplicationError::validation(format!(
                        "unreadable file part: {err}"
                    )))
                })?;
                file = Some((bytes.to_vec(), filename));
            }
            Some("folder") => {
                if let Ok(value) = field.text().await {
                    let value = value.trim().to_string();
                    if !value.is_empty() {
                        folder = value;
                    }
                }
            }
            _ => {}
        }
    }

    let (bytes, filename) = file.ok_or_else(|| {
        HttpError::from_error(ApplicationError::validation("file part is required"))
    })?;

    let stored = state
        .services
        .image_store()
        .upload(bytes, &filename, &folder)
        .await
        .map_err(HttpError::from_error)?;

    Ok(Json(UploadedImageResponse {
        url: stored.url,
        public_id: stored.public_id,
    }))
}
