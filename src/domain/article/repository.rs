// src/domain/article/repository.rs
use async_trait::async_trait;

use crate::domain::article::entity::{Article, ArticleId, ArticleUpdate, NewArticle};
use crate::domain::errors::DomainResult;
use crate::domain::slug::{Slug, SlugProbe};

#[async_trait]
pub trait ArticleRepository: SlugProbe + Send + Sync {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article>;
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;

    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Article>>;
    /// Newest-first offset page. Drafts are only included when requested by
    /// the admin surface.
    async fn list(
        &self,
        include_drafts: bool,
        limit: i64,
        offset: i64,
    ) -> DomainResult<(Vec<Article>, i64)>;
}
