// src/application/queries/provinces.rs
use std::sync::Arc;

use crate::application::dto::ProvinceDto;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::province::ProvinceRepository;
use crate::domain::slug::Slug;

pub struct ProvinceQueryService {
    provinces: Arc<dyn ProvinceRepository>,
}

impl ProvinceQueryService {
    pub fn new(provinces: Arc<dyn ProvinceRepository>) -> Self {
        Self { provinces }
    }

    pub async fn list(&self, include_inactive: bool) -> ApplicationResult<Vec<ProvinceDto>> {
        let provinces = self.provinces.list(include_inactive).await?;
        Ok(provinces.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_slug(&self, slug: &str) -> ApplicationResult<ProvinceDto> {
        let slug = Slug::new(slug)?;
        self.provinces
            .find_by_slug(&slug)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("province {slug} not found")))
    }
}
