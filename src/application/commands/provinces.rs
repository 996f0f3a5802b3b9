// src/application/commands/provinces.rs
use std::sync::Arc;

use crate::application::dto::ProvinceDto;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::time::Clock;
use crate::domain::city::CityRepository;
use crate::domain::errors::DomainError;
use crate::domain::province::{
    NewProvince, ProvinceId, ProvinceName, ProvinceRepository, ProvinceUpdate,
};
use crate::domain::slug::{SlugScope, UniqueSlugResolver};

pub struct CreateProvinceCommand {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

#[derive(Default)]
pub struct UpdateProvinceCommand {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

pub struct ProvinceCommandService {
    provinces: Arc<dyn ProvinceRepository>,
    cities: Arc<dyn CityRepository>,
    slugs: Arc<UniqueSlugResolver>,
    clock: Arc<dyn Clock>,
}

impl ProvinceCommandService {
    pub fn new(
        provinces: Arc<dyn ProvinceRepository>,
        cities: Arc<dyn CityRepository>,
        slugs: Arc<UniqueSlugResolver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            provinces,
            cities,
            slugs,
            clock,
        }
    }

    pub async fn create(&self, command: CreateProvinceCommand) -> ApplicationResult<ProvinceDto> {
        let name = ProvinceName::new(command.name)?;
        let now = self.clock.now();

        // The unique index is the authoritative guard; a losing race gets
        // one re-resolve before the conflict propagates.
        let mut attempts = 0u8;
        loop {
            let slug = self
                .slugs
                .resolve(self.provinces.as_ref(), name.as_str(), SlugScope::Global, None)
                .await?;
            let new_province = NewProvince {
                name: name.clone(),
                slug,
                description: command.description.clone(),
                image_url: command.image_url.clone(),
                is_active: command.is_active,
                sort_order: command.sort_order,
                created_at: now,
                updated_at: now,
            };
            match self.provinces.insert(new_province).await {
                Ok(created) => return Ok(created.into()),
                Err(DomainError::Conflict(_)) if attempts == 0 => attempts += 1,
                Err(err) => return Err(err.into()),
            }
        }
    }

    pub async fn update(
        &self,
        id: i64,
        command: UpdateProvinceCommand,
    ) -> ApplicationResult<ProvinceDto> {
        let id = ProvinceId::new(id)?;
        let existing = self
            .provinces
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("province {} not found", id.0)))?;

        let mut update = ProvinceUpdate::new(id, self.clock.now());
        if let Some(name) = command.name {
            let name = ProvinceName::new(name)?;
            if name != existing.name {
                let slug = self
                    .slugs
                    .resolve(
                        self.provinces.as_ref(),
                        name.as_str(),
                        SlugScope::Global,
                        Some(id.into()),
                    )
                    .await?;
                update.slug = Some(slug);
            }
            update.name = Some(name);
        }
        update.description = command.description;
        update.image_url = command.image_url;
        update.is_active = command.is_active;
        update.sort_order = command.sort_order;

        Ok(self.provinces.update(update).await?.into())
    }

    pub async fn delete(&self, id: i64) -> ApplicationResult<()> {
        let id = ProvinceId::new(id)?;
        self.provinces
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("province {} not found", id.0)))?;

        let cities = self.cities.list(Some(id), true).await?;
        if !cities.is_empty() {
            return Err(ApplicationError::conflict(format!(
                "province still has {} cities",
                cities.len()
            )));
        }

        self.provinces.delete(id).await?;
        Ok(())
    }
}
