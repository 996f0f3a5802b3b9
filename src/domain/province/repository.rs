// src/domain/province/repository.rs
use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::province::entity::{NewProvince, Province, ProvinceId, ProvinceUpdate};
use crate::domain::slug::{Slug, SlugProbe};

#[async_trait]
pub trait ProvinceRepository: SlugProbe + Send + Sync {
    async fn insert(&self, province: NewProvince) -> DomainResult<Province>;
    async fn update(&self, update: ProvinceUpdate) -> DomainResult<Province>;
    async fn delete(&self, id: ProvinceId) -> DomainResult<()>;

    async fn find_by_id(&self, id: ProvinceId) -> DomainResult<Option<Province>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Province>>;
    /// Exact-name lookup used by the school import flow's upsert path.
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Province>>;
    async fn list(&self, include_inactive: bool) -> DomainResult<Vec<Province>>;

    /// Signed adjustment of the cached aggregate, floored at zero.
    async fn adjust_schools_count(&self, id: ProvinceId, delta: i64) -> DomainResult<()>;
    /// Overwrite the cached aggregate with a freshly computed value.
    async fn set_schools_count(&self, id: ProvinceId, count: i64) -> DomainResult<()>;
}
