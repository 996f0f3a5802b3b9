// src/infrastructure/repositories/postgres_article.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleId, ArticleRepository, ArticleTitle, ArticleUpdate, NewArticle,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{Slug, SlugProbe, SlugScope};

const COLUMNS: &str = "id, title, slug, excerpt, body, cover_image_url, published, published_at, \
                       created_at, updated_at";

#[derive(Clone)]
pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    excerpt: Option<String>,
    body: String,
    cover_image_url: Option<String>,
    published: bool,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            slug: Slug::new(row.slug)?,
            excerpt: row.excerpt,
            body: row.body,
            cover_image_url: row.cover_image_url,
            published: row.published,
            published_at: row.published_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl SlugProbe for PostgresArticleRepository {
    async fn slug_taken(
        &self,
        candidate: &str,
        _scope: SlugScope,
        exclude_id: Option<i64>,
    ) -> DomainResult<bool> {
        let exists: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM articles WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)",
        )
        .bind(candidate)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(exists.is_some())
    }
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "INSERT INTO articles
                 (title, slug, excerpt, body, cover_image_url, published, published_at,
                  created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        ))
        .bind(article.title.as_str())
        .bind(article.slug.as_str())
        .bind(&article.excerpt)
        .bind(&article.body)
        .bind(&article.cover_image_url)
        .bind(article.published)
        .bind(article.published_at)
        .bind(article.created_at)
        .bind(article.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Article::try_from(row)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE articles SET updated_at = ");
        builder.push_bind(update.updated_at);

        if let Some(title) = update.title {
            builder.push(", title = ");
            builder.push_bind(String::from(title));
        }
        if let Some(slug) = update.slug {
            builder.push(", slug = ");
            builder.push_bind(String::from(slug));
        }
        if let Some(excerpt) = update.excerpt {
            builder.push(", excerpt = ");
            builder.push_bind(excerpt);
        }
        if let Some(body) = update.body {
            builder.push(", body = ");
            builder.push_bind(body);
        }
        if let Some(cover_image_url) = update.cover_image_url {
            builder.push(", cover_image_url = ");
            builder.push_bind(cover_image_url);
        }
        if let Some(published) = update.published {
            builder.push(", published = ");
            builder.push_bind(published);
        }
        if let Some(published_at) = update.published_at {
            builder.push(", published_at = ");
            builder.push_bind(published_at);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(update.id));
        builder.push(format!(" RETURNING {COLUMNS}"));

        let row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;

        Article::try_from(row)
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(Article::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {COLUMNS} FROM articles WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(Article::try_from).transpose()
    }

    async fn list(
        &self,
        include_drafts: bool,
        limit: i64,
        offset: i64,
    ) -> DomainResult<(Vec<Article>, i64)> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE ($1 OR published)")
                .bind(include_drafts)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx)?;

        let rows = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {COLUMNS} FROM articles
             WHERE ($1 OR published)
             ORDER BY COALESCE(published_at, created_at) DESC, id DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(include_drafts)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let articles = rows
            .into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((articles, total))
    }
}
