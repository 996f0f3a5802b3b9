// src/presentation/http/controllers/sitemap.rs
use axum::{Extension, Json};

use crate::application::dto::SitemapDto;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;

#[utoipa::path(
    get,
    path = "/api/v1/sitemap",
    responses((status = 200, description = "Active slugs with last-modified timestamps for SEO consumers.", body = SitemapDto)),
    tag = "System"
)]
pub async fn sitemap(Extension(state): Extension<HttpState>) -> HttpResult<Json<SitemapDto>> {
    state
        .services
        .sitemap_queries
        .sitemap()
        .await
        .into_http()
        .map(Json)
}
