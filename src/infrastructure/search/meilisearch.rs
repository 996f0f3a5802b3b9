// src/infrastructure/search/meilisearch.rs
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::application::dto::search::SearchProjection;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::SearchIndexWriter;

const SCHOOLS_INDEX: &str = "schools";
const PROVINCES_INDEX: &str = "provinces";
const CITIES_INDEX: &str = "cities";

/// Pushes the directory projection into a Meilisearch instance over its HTTP
/// API. Each index is wiped and repopulated; Meilisearch applies the document
/// batches asynchronously on its side.
pub struct MeilisearchIndexWriter {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MeilisearchIndexWriter {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    async fn replace_index<T: Serialize>(&self, index: &str, docs: &[T]) -> ApplicationResult<()> {
        let base = &self.base_url;

        let response = self
            .client
            .delete(format!("{base}/indexes/{index}/documents"))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|err| {
                ApplicationError::infrastructure(format!("search index clear failed: {err}"))
            })?;
        // 404 just means the index does not exist yet; the add below creates it.
        if !response.status().is_success() && response.status().as_u16() != 404 {
            return Err(ApplicationError::infrastructure(format!(
                "search index clear failed: {} returned {}",
                index,
                response.status()
            )));
        }

        let response = self
            .client
            .post(format!("{base}/indexes/{index}/documents?primaryKey=id"))
            .bearer_auth(&self.api_key)
            .json(docs)
            .send()
            .await
            .map_err(|err| {
                ApplicationError::infrastructure(format!("search index write failed: {err}"))
            })?;
        if !response.status().is_success() {
            return Err(ApplicationError::infrastructure(format!(
                "search index write failed: {} returned {}",
                index,
                response.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchIndexWriter for MeilisearchIndexWriter {
    async fn replace_all(&self, projection: &SearchProjection) -> ApplicationResult<()> {
        self.replace_index(SCHOOLS_INDEX, &projection.schools)
            .await?;
        self.replace_index(PROVINCES_INDEX, &projection.provinces)
            .await?;
        self.replace_index(CITIES_INDEX, &projection.cities).await?;
        info!(
            schools = projection.schools.len(),
            provinces = projection.provinces.len(),
            cities = projection.cities.len(),
            "search indexes replaced"
        );
        Ok(())
    }
}
