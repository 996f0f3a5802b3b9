// src/application/ports/search.rs
use async_trait::async_trait;

use crate::application::dto::search::SearchProjection;
use crate::application::error::ApplicationResult;

/// One-way projection sink: replaces the contents of the external search
/// indexes with the given documents. Not kept continuously consistent with
/// repository writes; triggered on demand from the admin surface.
///
/// Environments without a search service get the no-op implementation at
/// startup, so callers never branch on configuration.
#[async_trait]
pub trait SearchIndexWriter: Send + Sync {
    async fn replace_all(&self, projection: &SearchProjection) -> ApplicationResult<()>;
}
