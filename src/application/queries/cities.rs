// src/application/queries/cities.rs
use std::sync::Arc;

use crate::application::dto::CityDto;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::city::CityRepository;
use crate::domain::province::ProvinceRepository;
use crate::domain::slug::Slug;

pub struct CityQueryService {
    cities: Arc<dyn CityRepository>,
    provinces: Arc<dyn ProvinceRepository>,
}

impl CityQueryService {
    pub fn new(cities: Arc<dyn CityRepository>, provinces: Arc<dyn ProvinceRepository>) -> Self {
        Self { cities, provinces }
    }

    pub async fn list(
        &self,
        province_slug: Option<&str>,
        include_inactive: bool,
    ) -> ApplicationResult<Vec<CityDto>> {
        let province_id = match province_slug {
            Some(raw) => {
                let slug = Slug::new(raw)?;
                let province = self.provinces.find_by_slug(&slug).await?.ok_or_else(|| {
                    ApplicationError::not_found(format!("province {slug} not found"))
                })?;
                Some(province.id)
            }
            None => None,
        };

        let cities = self.cities.list(province_id, include_inactive).await?;
        Ok(cities.into_iter().map(Into::into).collect())
    }

    /// City slugs are only unique within a province, so lookups always go
    /// through the province slug.
    pub async fn get_by_slug(
        &self,
        province_slug: &str,
        city_slug: &str,
    ) -> ApplicationResult<CityDto> {
        let province_slug = Slug::new(province_slug)?;
        let province = self
            .provinces
            .find_by_slug(&province_slug)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(format!("province {province_slug} not found"))
            })?;

        let city_slug = Slug::new(city_slug)?;
        self.cities
            .find_by_slug(province.id, &city_slug)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("city {city_slug} not found")))
    }
}
