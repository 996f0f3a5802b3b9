// src/domain/school/repository.rs
use async_trait::async_trait;

use crate::domain::city::CityId;
use crate::domain::errors::DomainResult;
use crate::domain::province::ProvinceId;
use crate::domain::school::entity::{NewSchool, School, SchoolId, SchoolUpdate, SchoolView};
use crate::domain::slug::{Slug, SlugProbe};

/// Equality/containment predicates for school listings. Province and city
/// are matched by slug because that is what public URLs carry.
#[derive(Debug, Clone, Default)]
pub struct SchoolFilter {
    pub province_slug: Option<String>,
    pub city_slug: Option<String>,
    pub only_active: bool,
    pub verified: Option<bool>,
    pub featured: Option<bool>,
    pub service: Option<String>,
    pub name_query: Option<String>,
}

#[async_trait]
pub trait SchoolRepository: SlugProbe + Send + Sync {
    async fn insert(&self, school: NewSchool) -> DomainResult<School>;
    async fn update(&self, update: SchoolUpdate) -> DomainResult<School>;
    async fn delete(&self, id: SchoolId) -> DomainResult<()>;

    async fn find_by_id(&self, id: SchoolId) -> DomainResult<Option<School>>;
    async fn find_view_by_id(&self, id: SchoolId) -> DomainResult<Option<SchoolView>>;
    async fn find_view_by_slug(&self, slug: &Slug) -> DomainResult<Option<SchoolView>>;

    /// Offset-paged listing ordered featured-first, then `sort_order`, then
    /// recency. Returns the page and the total match count.
    async fn list_views(
        &self,
        filter: &SchoolFilter,
        limit: i64,
        offset: i64,
    ) -> DomainResult<(Vec<SchoolView>, i64)>;

    /// Active schools sharing the city (preferred) or province of the given
    /// school, excluding the school itself.
    async fn related_views(
        &self,
        city_id: CityId,
        province_id: ProvinceId,
        exclude: SchoolId,
        limit: i64,
    ) -> DomainResult<Vec<SchoolView>>;

    /// True counts of child schools, used by the counter reconciliation and
    /// the city delete guard.
    async fn count_by_city(&self, city_id: CityId, active_only: bool) -> DomainResult<i64>;
    async fn count_by_province(
        &self,
        province_id: ProvinceId,
        active_only: bool,
    ) -> DomainResult<i64>;
}
