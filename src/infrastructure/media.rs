// src/infrastructure/media.rs
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::{ImageStore, StoredImage};

/// Unsigned upload against the Cloudinary REST API. The preset configured on
/// the Cloudinary side controls transformations and allowed formats.
pub struct CloudinaryImageStore {
    client: Client,
    cloud_name: String,
    upload_preset: String,
}

#[derive(Debug, Deserialize)]
struct CloudinaryUploadResponse {
    secure_url: String,
    public_id: String,
}

impl CloudinaryImageStore {
    pub fn new(cloud_name: impl Into<String>, upload_preset: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            cloud_name: cloud_name.into(),
            upload_preset: upload_preset.into(),
        }
    }
}

#[async_trait]
impl ImageStore for CloudinaryImageStore {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        folder: &str,
    ) -> ApplicationResult<StoredImage> {
        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        );
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(filename.to_string()))
            .text("upload_preset", self.upload_preset.clone())
            .text("folder", folder.to_string());

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                ApplicationError::infrastructure(format!("image upload failed: {err}"))
            })?;

        if !response.status().is_success() {
            return Err(ApplicationError::infrastructure(format!(
                "image upload rejected with status {}",
                response.status()
            )));
        }

        let body: CloudinaryUploadResponse = response.json().await.map_err(|err| {
            ApplicationError::infrastructure(format!("image upload response unreadable: {err}"))
        })?;

        Ok(StoredImage {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }
}

/// Used when no image store is configured; upload requests fail cleanly
/// instead of panicking at wiring time.
pub struct DisabledImageStore;

#[async_trait]
impl ImageStore for DisabledImageStore {
    async fn upload(
        &self,
        _bytes: Vec<u8>,
        _filename: &str,
        _folder: &str,
    ) -> ApplicationResult<StoredImage> {
        Err(ApplicationError::infrastructure(
            "image storage is not configured",
        ))
    }
}
