// src/application/commands/cities.rs
use std::sync::Arc;

use crate::application::dto::CityDto;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::time::Clock;
use crate::domain::city::{CityId, CityName, CityRepository, CityUpdate, NewCity};
use crate::domain::errors::DomainError;
use crate::domain::province::{ProvinceId, ProvinceRepository};
use crate::domain::school::SchoolRepository;
use crate::domain::slug::{SlugScope, UniqueSlugResolver};

pub struct CreateCityCommand {
    pub province_id: i64,
    pub name: String,
    pub is_active: bool,
    pub sort_order: i32,
}

#[derive(Default)]
pub struct UpdateCityCommand {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

pub struct CityCommandService {
    cities: Arc<dyn CityRepository>,
    provinces: Arc<dyn ProvinceRepository>,
    schools: Arc<dyn SchoolRepository>,
    slugs: Arc<UniqueSlugResolver>,
    clock: Arc<dyn Clock>,
}

impl CityCommandService {
    pub fn new(
        cities: Arc<dyn CityRepository>,
        provinces: Arc<dyn ProvinceRepository>,
        schools: Arc<dyn SchoolRepository>,
        slugs: Arc<UniqueSlugResolver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cities,
            provinces,
            schools,
            slugs,
            clock,
        }
    }

    pub async fn create(&self, command: CreateCityCommand) -> ApplicationResult<CityDto> {
        let province_id = ProvinceId::new(command.province_id)?;
        self.provinces
            .find_by_id(province_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(format!("province {} not found", province_id.0))
            })?;

        let name = CityName::new(command.name)?;
        let now = self.clock.now();

        let mut attempts = 0u8;
        loop {
            let slug = self
                .slugs
                .resolve(
                    self.cities.as_ref(),
                    name.as_str(),
                    SlugScope::WithinProvince(province_id),
                    None,
                )
                .await?;
            let new_city = NewCity {
                province_id,
                name: name.clone(),
                slug,
                is_active: command.is_active,
                sort_order: command.sort_order,
                created_at: now,
                updated_at: now,
            };
            match self.cities.insert(new_city).await {
                Ok(created) => return Ok(created.into()),
                Err(DomainError::Conflict(_)) if attempts == 0 => attempts += 1,
                Err(err) => return Err(err.into()),
            }
        }
    }

    pub async fn update(&self, id: i64, command: UpdateCityCommand) -> ApplicationResult<CityDto> {
        let id = CityId::new(id)?;
        let existing = self
            .cities
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("city {} not found", id.0)))?;

        let mut update = CityUpdate::new(id, self.clock.now());
        if let Some(name) = command.name {
            let name = CityName::new(name)?;
            if name != existing.name {
                let slug = self
                    .slugs
                    .resolve(
                        self.cities.as_ref(),
                        name.as_str(),
                        SlugScope::WithinProvince(existing.province_id),
                        Some(id.into()),
                    )
                    .await?;
                update.slug = Some(slug);
            }
            update.name = Some(name);
        }
        update.is_active = command.is_active;
        update.sort_order = command.sort_order;

        Ok(self.cities.update(update).await?.into())
    }

    /// Deleting a city is blocked while any school, active or not, still
    /// references it. The guard performs no mutation on refusal.
    pub async fn delete(&self, id: i64) -> ApplicationResult<()> {
        let id = CityId::new(id)?;
        self.cities
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("city {} not found", id.0)))?;

        let dependents = self.schools.count_by_city(id, false).await?;
        if dependents > 0 {
            return Err(ApplicationError::conflict(format!(
                "city still has {dependents} schools"
            )));
        }

        self.cities.delete(id).await?;
        Ok(())
    }
}
