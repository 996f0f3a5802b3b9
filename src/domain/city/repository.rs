// src/domain/city/repository.rs
use async_trait::async_trait;

use crate::domain::city::entity::{City, CityId, CityUpdate, NewCity};
use crate::domain::errors::DomainResult;
use crate::domain::province::ProvinceId;
use crate::domain::slug::{Slug, SlugProbe};

#[async_trait]
pub trait CityRepository: SlugProbe + Send + Sync {
    async fn insert(&self, city: NewCity) -> DomainResult<City>;
    async fn update(&self, update: CityUpdate) -> DomainResult<City>;
    async fn delete(&self, id: CityId) -> DomainResult<()>;

    async fn find_by_id(&self, id: CityId) -> DomainResult<Option<City>>;
    async fn find_by_slug(&self, province_id: ProvinceId, slug: &Slug)
        -> DomainResult<Option<City>>;
    /// Exact-name lookup within a province, used by the school import flow.
    async fn find_by_name(&self, province_id: ProvinceId, name: &str)
        -> DomainResult<Option<City>>;
    async fn list(
        &self,
        province_id: Option<ProvinceId>,
        include_inactive: bool,
    ) -> DomainResult<Vec<City>>;

    async fn adjust_schools_count(&self, id: CityId, delta: i64) -> DomainResult<()>;
    async fn set_schools_count(&self, id: CityId, count: i64) -> DomainResult<()>;
}
