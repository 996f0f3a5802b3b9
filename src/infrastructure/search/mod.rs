// src/infrastructure/search/mod.rs
mod meilisearch;

pub use meilisearch::MeilisearchIndexWriter;

use async_trait::async_trait;
use tracing::debug;

use crate::application::dto::search::SearchProjection;
use crate::application::error::ApplicationResult;
use crate::application::ports::SearchIndexWriter;

/// Stand-in used when no search service is configured. Reindex requests
/// succeed without doing anything, so the admin surface behaves the same in
/// every environment.
pub struct NoopSearchIndexWriter;

#[async_trait]
impl SearchIndexWriter for NoopSearchIndexWriter {
    async fn replace_all(&self, projection: &SearchProjection) -> ApplicationResult<()> {
        debug!(
            schools = projection.schools.len(),
            provinces = projection.provinces.len(),
            cities = projection.cities.len(),
            "search indexing disabled; projection dropped"
        );
        Ok(())
    }
}
