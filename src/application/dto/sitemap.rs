// src/application/dto/sitemap.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One sitemap entry: the route segment plus last-modified, enough for an
/// SEO consumer to build URLs without further lookups.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SitemapEntry {
    pub slug: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SitemapDto {
    pub provinces: Vec<SitemapEntry>,
    /// City entries carry `province-slug/city-slug` because city slugs are
    /// only unique within their province.
    pub cities: Vec<SitemapEntry>,
    pub schools: Vec<SitemapEntry>,
    pub articles: Vec<SitemapEntry>,
}
