// src/application/queries/articles.rs
use std::sync::Arc;

use crate::application::dto::{ArticleDto, Page, PageRequest};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::article::ArticleRepository;
use crate::domain::slug::Slug;

pub struct ArticleQueryService {
    articles: Arc<dyn ArticleRepository>,
}

impl ArticleQueryService {
    pub fn new(articles: Arc<dyn ArticleRepository>) -> Self {
        Self { articles }
    }

    pub async fn list(
        &self,
        include_drafts: bool,
        page: PageRequest,
    ) -> ApplicationResult<Page<ArticleDto>> {
        let (articles, total) = self
            .articles
            .list(include_drafts, page.limit(), page.offset())
            .await?;
        let items = articles.into_iter().map(Into::into).collect();
        Ok(Page::new(items, total, &page))
    }

    pub async fn get_by_slug(
        &self,
        slug: &str,
        include_drafts: bool,
    ) -> ApplicationResult<ArticleDto> {
        let slug = Slug::new(slug)?;
        let article = self
            .articles
            .find_by_slug(&slug)
            .await?
            .filter(|article| include_drafts || article.published)
            .ok_or_else(|| ApplicationError::not_found(format!("article {slug} not found")))?;
        Ok(article.into())
    }
}
