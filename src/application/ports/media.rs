// src/application/ports/media.rs
use async_trait::async_trait;

use crate::application::error::ApplicationResult;

/// Result of handing an upload to the external image store. Only the URL is
/// persisted on entities; the raw bytes never touch the database.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub url: String,
    pub public_id: String,
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        folder: &str,
    ) -> ApplicationResult<StoredImage>;
}
