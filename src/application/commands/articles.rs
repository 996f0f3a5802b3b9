// src/application/commands/articles.rs
use std::sync::Arc;

use crate::application::dto::ArticleDto;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::time::Clock;
use crate::domain::article::{
    ArticleId, ArticleRepository, ArticleTitle, ArticleUpdate, NewArticle,
};
use crate::domain::errors::DomainError;
use crate::domain::slug::{SlugScope, UniqueSlugResolver};

pub struct CreateArticleCommand {
    pub title: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub cover_image_url: Option<String>,
    pub publish: bool,
}

#[derive(Default)]
pub struct UpdateArticleCommand {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub cover_image_url: Option<String>,
    pub publish: Option<bool>,
}

pub struct ArticleCommandService {
    articles: Arc<dyn ArticleRepository>,
    slugs: Arc<UniqueSlugResolver>,
    clock: Arc<dyn Clock>,
}

impl ArticleCommandService {
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        slugs: Arc<UniqueSlugResolver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            articles,
            slugs,
            clock,
        }
    }

    pub async fn create(&self, command: CreateArticleCommand) -> ApplicationResult<ArticleDto> {
        let title = ArticleTitle::new(command.title)?;
        let body = command.body;
        if body.trim().is_empty() {
            return Err(ApplicationError::validation("body is required"));
        }
        let now = self.clock.now();

        let mut attempts = 0u8;
        loop {
            let slug = self
                .slugs
                .resolve(self.articles.as_ref(), title.as_str(), SlugScope::Global, None)
                .await?;
            let new_article = NewArticle {
                title: title.clone(),
                slug,
                excerpt: command.excerpt.clone(),
                body: body.clone(),
                cover_image_url: command.cover_image_url.clone(),
                published: command.publish,
                published_at: command.publish.then_some(now),
                created_at: now,
                updated_at: now,
            };
            match self.articles.insert(new_article).await {
                Ok(created) => return Ok(created.into()),
                Err(DomainError::Conflict(_)) if attempts == 0 => attempts += 1,
                Err(err) => return Err(err.into()),
            }
        }
    }

    pub async fn update(&self, id: i64, command: UpdateArticleCommand) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(id)?;
        let existing = self
            .articles
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("article {} not found", id.0)))?;

        let now = self.clock.now();
        let mut update = ArticleUpdate::new(id, now);
        if let Some(title) = command.title {
            let title = ArticleTitle::new(title)?;
            if title != existing.title {
                let slug = self
                    .slugs
                    .resolve(
                        self.articles.as_ref(),
                        title.as_str(),
                        SlugScope::Global,
                        Some(id.into()),
                    )
                    .await?;
                update.slug = Some(slug);
            }
            update.title = Some(title);
        }
        update.excerpt = command.excerpt;
        update.body = command.body;
        update.cover_image_url = command.cover_image_url;
        if let Some(publish) = command.publish {
            if publish != existing.published {
                update.published = Some(publish);
                update.published_at = Some(publish.then_some(now));
            }
        }

        Ok(self.articles.update(update).await?.into())
    }

    pub async fn set_published(&self, id: i64, publish: bool) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(id)?;
        let existing = self
            .articles
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("article {} not found", id.0)))?;
        if existing.published == publish {
            return Ok(existing.into());
        }

        let now = self.clock.now();
        let mut update = ArticleUpdate::new(id, now);
        update.published = Some(publish);
        update.published_at = Some(publish.then_some(now));
        Ok(self.articles.update(update).await?.into())
    }

    pub async fn delete(&self, id: i64) -> ApplicationResult<()> {
        let id = ArticleId::new(id)?;
        self.articles.delete(id).await?;
        Ok(())
    }
}
