// src/application/queries/schools.rs
use std::sync::Arc;

use crate::application::dto::{Page, PageRequest, SchoolDto};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::school::{SchoolFilter, SchoolRepository};
use crate::domain::slug::Slug;

/// Listing filters as they arrive from the query string; mapped onto the
/// repository's `SchoolFilter`.
#[derive(Debug, Clone, Default)]
pub struct ListSchoolsQuery {
    pub province: Option<String>,
    pub city: Option<String>,
    pub verified: Option<bool>,
    pub featured: Option<bool>,
    pub service: Option<String>,
    pub q: Option<String>,
    /// Admin listings include inactive schools; public ones never do.
    pub include_inactive: bool,
}

pub struct SchoolQueryService {
    schools: Arc<dyn SchoolRepository>,
}

impl SchoolQueryService {
    pub fn new(schools: Arc<dyn SchoolRepository>) -> Self {
        Self { schools }
    }

    pub async fn list(
        &self,
        query: ListSchoolsQuery,
        page: PageRequest,
    ) -> ApplicationResult<Page<SchoolDto>> {
        let filter = SchoolFilter {
            province_slug: query.province,
            city_slug: query.city,
            only_active: !query.include_inactive,
            verified: query.verified,
            featured: query.featured,
            service: query.service,
            name_query: query.q.map(|q| q.trim().to_string()).filter(|q| !q.is_empty()),
        };

        let (views, total) = self
            .schools
            .list_views(&filter, page.limit(), page.offset())
            .await?;
        let items = views.into_iter().map(Into::into).collect();
        Ok(Page::new(items, total, &page))
    }

    pub async fn get_by_slug(&self, slug: &str) -> ApplicationResult<SchoolDto> {
        let slug = Slug::new(slug)?;
        self.schools
            .find_view_by_slug(&slug)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("school {slug} not found")))
    }

    /// Active schools in the same city, padded from the same province,
    /// excluding the school itself.
    pub async fn related(&self, slug: &str, limit: u32) -> ApplicationResult<Vec<SchoolDto>> {
        let slug = Slug::new(slug)?;
        let view = self
            .schools
            .find_view_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("school {slug} not found")))?;

        let limit = i64::from(limit.clamp(1, 20));
        let related = self
            .schools
            .related_views(
                view.school.city_id,
                view.school.province_id,
                view.school.id,
                limit,
            )
            .await?;
        Ok(related.into_iter().map(Into::into).collect())
    }
}
