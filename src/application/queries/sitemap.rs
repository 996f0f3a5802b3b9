// src/application/queries/sitemap.rs
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::dto::{SitemapDto, SitemapEntry};
use crate::application::error::ApplicationResult;
use crate::domain::article::ArticleRepository;
use crate::domain::city::CityRepository;
use crate::domain::province::ProvinceRepository;
use crate::domain::school::{SchoolFilter, SchoolRepository};

/// Read-only bulk listing of active slugs with last-modified timestamps for
/// SEO consumers; no logic beyond the standard list contracts.
pub struct SitemapQueryService {
    provinces: Arc<dyn ProvinceRepository>,
    cities: Arc<dyn CityRepository>,
    schools: Arc<dyn SchoolRepository>,
    articles: Arc<dyn ArticleRepository>,
}

impl SitemapQueryService {
    pub fn new(
        provinces: Arc<dyn ProvinceRepository>,
        cities: Arc<dyn CityRepository>,
        schools: Arc<dyn SchoolRepository>,
        articles: Arc<dyn ArticleRepository>,
    ) -> Self {
        Self {
            provinces,
            cities,
            schools,
            articles,
        }
    }

    pub async fn sitemap(&self) -> ApplicationResult<SitemapDto> {
        let provinces = self.provinces.list(false).await?;
        let province_slugs: HashMap<i64, String> = provinces
            .iter()
            .map(|p| (i64::from(p.id), p.slug.as_str().to_string()))
            .collect();

        let cities = self
            .cities
            .list(None, false)
            .await?
            .into_iter()
            .map(|city| {
                let prefix = province_slugs
                    .get(&i64::from(city.province_id))
                    .cloned()
                    .unwrap_or_default();
                SitemapEntry {
                    slug: format!("{prefix}/{}", city.slug),
                    updated_at: city.updated_at,
                }
            })
            .collect();

        let filter = SchoolFilter {
            only_active: true,
            ..SchoolFilter::default()
        };
        let (school_views, _) = self.schools.list_views(&filter, i64::MAX, 0).await?;
        let schools = school_views
            .into_iter()
            .map(|view| SitemapEntry {
                slug: String::from(view.school.slug),
                updated_at: view.school.updated_at,
            })
            .collect();

        let (articles, _) = self.articles.list(false, i64::MAX, 0).await?;
        let articles = articles
            .into_iter()
            .map(|article| SitemapEntry {
                slug: String::from(article.slug),
                updated_at: article.updated_at,
            })
            .collect();

        Ok(SitemapDto {
            provinces: provinces
                .into_iter()
                .map(|p| SitemapEntry {
                    slug: String::from(p.slug),
                    updated_at: p.updated_at,
                })
                .collect(),
            cities,
            schools,
            articles,
        })
    }
}
