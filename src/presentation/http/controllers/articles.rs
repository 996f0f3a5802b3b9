// src/presentation/http/controllers/articles.rs
use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::application::commands::articles::{CreateArticleCommand, UpdateArticleCommand};
use crate::application::dto::{ArticleDto, Page, PageRequest};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::AdminAuthenticated;
use crate::presentation::http::state::HttpState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub body: String,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub publish: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub cover_image_url: Option<String>,
    pub publish: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PublishRequest {
    pub publish: bool,
}

#[utoipa::path(
    get,
    path = "/api/v1/articles",
    responses((status = 200, description = "Published articles, newest first.", body = Page<ArticleDto>)),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    Query(page): Query<PageRequest>,
) -> HttpResult<Json<Page<ArticleDto>>> {
    state
        .services
        .article_queries
        .list(false, page)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{slug}",
    responses(
        (status = 200, description = "Published article.", body = ArticleDto),
        (status = 404, description = "Unknown slug, or the article is a draft.")
    ),
    tag = "Articles"
)]
pub async fn get_article_by_slug(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_by_slug(&slug, false)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/articles",
    responses((status = 200, description = "All articles, drafts included.", body = Page<ArticleDto>)),
    tag = "Admin"
)]
pub async fn admin_list_articles(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Query(page): Query<PageRequest>,
) -> HttpResult<Json<Page<ArticleDto>>> {
    state
        .services
        .article_queries
        .list(true, page)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 200, description = "Article created, optionally published immediately.", body = ArticleDto),
        (status = 400, description = "Empty title or body.")
    ),
    tag = "Admin"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Json(payload): Json<CreateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = CreateArticleCommand {
        title: payload.title,
        excerpt: payload.excerpt,
        body: payload.body,
        cover_image_url: payload.cover_image_url,
        publish: payload.publish,
    };
    state
        .services
        .article_commands
        .create(command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/articles/{id}",
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Article updated; a retitle re-derives the slug.", body = ArticleDto),
        (status = 404, description = "Unknown article id.")
    ),
    tag = "Admin"
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = UpdateArticleCommand {
        title: payload.title,
        excerpt: payload.excerpt,
        body: payload.body,
        cover_image_url: payload.cover_image_url,
        publish: payload.publish,
    };
    state
        .services
        .article_commands
        .update(id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/articles/{id}/publish",
    request_body = PublishRequest,
    responses((status = 200, description = "Publish state set; unpublishing clears the publish timestamp.", body = ArticleDto)),
    tag = "Admin"
)]
pub async fn set_publish_state(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
    Json(payload): Json<PublishRequest>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .set_published(id, payload.publish)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/articles/{id}",
    responses((status = 200, description = "Article deleted.")),
    tag = "Admin"
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .article_commands
        .delete(id)
        .await
        .into_http()?;
    Ok(Json(json!({ "status": "deleted" })))
}
