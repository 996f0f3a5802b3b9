// src/application/commands/schools.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::dto::SchoolDto;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::time::Clock;
use crate::domain::city::{City, CityId, CityName, CityRepository, NewCity};
use crate::domain::counters::CounterMaintainer;
use crate::domain::errors::DomainError;
use crate::domain::province::{NewProvince, Province, ProvinceName, ProvinceRepository};
use crate::domain::school::{
    NewSchool, School, SchoolId, SchoolName, SchoolRepository, SchoolUpdate,
};
use crate::domain::slug::{SlugScope, UniqueSlugResolver};

/// Where a new school lives: either an existing city, or a city/province
/// pair by name that the import flow creates on demand.
pub enum SchoolLocation {
    CityId(i64),
    ByName { city: String, province: String },
}

pub struct CreateSchoolCommand {
    pub name: String,
    pub location: SchoolLocation,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub services: Vec<String>,
    /// Schools are listed only after explicit activation.
    pub is_active: bool,
    pub is_verified: bool,
    pub is_featured: bool,
    pub sort_order: i32,
}

#[derive(Default)]
pub struct UpdateSchoolCommand {
    pub name: Option<String>,
    pub city_id: Option<i64>,
    pub rating: Option<f64>,
    pub reviews_count: Option<i32>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub services: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
}

pub struct SchoolCommandService {
    schools: Arc<dyn SchoolRepository>,
    cities: Arc<dyn CityRepository>,
    provinces: Arc<dyn ProvinceRepository>,
    slugs: Arc<UniqueSlugResolver>,
    counters: Arc<CounterMaintainer>,
    clock: Arc<dyn Clock>,
}

impl SchoolCommandService {
    pub fn new(
        schools: Arc<dyn SchoolRepository>,
        cities: Arc<dyn CityRepository>,
        provinces: Arc<dyn ProvinceRepository>,
        slugs: Arc<UniqueSlugResolver>,
        counters: Arc<CounterMaintainer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            schools,
            cities,
            provinces,
            slugs,
            counters,
            clock,
        }
    }

    pub async fn create(&self, command: CreateSchoolCommand) -> ApplicationResult<SchoolDto> {
        let name = SchoolName::new(command.name)?;
        let now = self.clock.now();

        let city = match command.location {
            SchoolLocation::CityId(id) => {
                let id = CityId::new(id)?;
                self.cities.find_by_id(id).await?.ok_or_else(|| {
                    ApplicationError::not_found(format!("city {} not found", id.0))
                })?
            }
            SchoolLocation::ByName { city, province } => {
                let province = self.ensure_province(&province, now).await?;
                self.ensure_city(&province, &city, now).await?
            }
        };

        // province_id is always derived from the city; callers never supply
        // it directly.
        let mut attempts = 0u8;
        let created = loop {
            let slug = self
                .slugs
                .resolve(self.schools.as_ref(), name.as_str(), SlugScope::Global, None)
                .await?;
            let new_school = NewSchool {
                name: name.clone(),
                slug,
                city_id: city.id,
                province_id: city.province_id,
                rating: 0.0,
                reviews_count: 0,
                price_min: command.price_min,
                price_max: command.price_max,
                phone: command.phone.clone(),
                email: command.email.clone(),
                website: command.website.clone(),
                address: command.address.clone(),
                services: command.services.clone(),
                is_active: command.is_active,
                is_verified: command.is_verified,
                is_featured: command.is_featured,
                sort_order: command.sort_order,
                created_at: now,
                updated_at: now,
            };
            match self.schools.insert(new_school).await {
                Ok(created) => break created,
                Err(DomainError::Conflict(_)) if attempts == 0 => attempts += 1,
                Err(err) => return Err(err.into()),
            }
        };

        self.apply_counters(None, Some(&created)).await;
        self.view_of(created.id).await
    }

    pub async fn update(&self, id: i64, command: UpdateSchoolCommand) -> ApplicationResult<SchoolDto> {
        let id = SchoolId::new(id)?;
        let before = self
            .schools
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("school {} not found", id.0)))?;

        let mut update = SchoolUpdate::new(id, self.clock.now());
        if let Some(name) = command.name {
            let name = SchoolName::new(name)?;
            if name != before.name {
                let slug = self
                    .slugs
                    .resolve(
                        self.schools.as_ref(),
                        name.as_str(),
                        SlugScope::Global,
                        Some(id.into()),
                    )
                    .await?;
                update.slug = Some(slug);
            }
            update.name = Some(name);
        }
        if let Some(city_id) = command.city_id {
            let city_id = CityId::new(city_id)?;
            if city_id != before.city_id {
                let city = self.cities.find_by_id(city_id).await?.ok_or_else(|| {
                    ApplicationError::not_found(format!("city {} not found", city_id.0))
                })?;
                // Keeps the materialized province reference consistent with
                // the new city.
                update.city_move = Some((city.id, city.province_id));
            }
        }
        update.rating = command.rating;
        update.reviews_count = command.reviews_count;
        update.price_min = command.price_min;
        update.price_max = command.price_max;
        update.phone = command.phone;
        update.email = command.email;
        update.website = command.website;
        update.address = command.address;
        update.services = command.services;
        update.is_active = command.is_active;
        update.is_verified = command.is_verified;
        update.is_featured = command.is_featured;
        update.sort_order = command.sort_order;

        let after = self.schools.update(update).await?;
        self.apply_counters(Some(&before), Some(&after)).await;
        self.view_of(after.id).await
    }

    pub async fn set_active(&self, id: i64, active: bool) -> ApplicationResult<SchoolDto> {
        let id = SchoolId::new(id)?;
        let before = self
            .schools
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("school {} not found", id.0)))?;

        if before.is_active == active {
            return self.view_of(id).await;
        }

        let mut update = SchoolUpdate::new(id, self.clock.now());
        update.is_active = Some(active);
        let after = self.schools.update(update).await?;
        self.apply_counters(Some(&before), Some(&after)).await;
        self.view_of(after.id).await
    }

    pub async fn delete(&self, id: i64) -> ApplicationResult<()> {
        let id = SchoolId::new(id)?;
        let before = self
            .schools
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("school {} not found", id.0)))?;

        self.schools.delete(id).await?;
        self.apply_counters(Some(&before), None).await;
        Ok(())
    }

    /// Counter drift is tolerated: the school write already succeeded, so a
    /// failed adjustment is logged and left for reconciliation.
    async fn apply_counters(&self, before: Option<&School>, after: Option<&School>) {
        if let Err(err) = self.counters.apply_school_change(before, after).await {
            let school_id = after
                .or(before)
                .map(|s| i64::from(s.id))
                .unwrap_or_default();
            tracing::warn!(
                error = %err,
                school_id,
                "cached school counters not updated; run count reconciliation"
            );
        }
    }

    async fn view_of(&self, id: SchoolId) -> ApplicationResult<SchoolDto> {
        self.schools
            .find_view_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("school {} not found", id.0)))
    }

    async fn ensure_province(
        &self,
        name: &str,
        now: DateTime<Utc>,
    ) -> ApplicationResult<Province> {
        let name = ProvinceName::new(name)?;
        if let Some(existing) = self.provinces.find_by_name(name.as_str()).await? {
            return Ok(existing);
        }

        let mut attempts = 0u8;
        loop {
            let slug = self
                .slugs
                .resolve(self.provinces.as_ref(), name.as_str(), SlugScope::Global, None)
                .await?;
            let new_province = NewProvince {
                name: name.clone(),
                slug,
                description: None,
                image_url: None,
                is_active: true,
                sort_order: 0,
                created_at: now,
                updated_at: now,
            };
            match self.provinces.insert(new_province).await {
                Ok(created) => return Ok(created),
                Err(DomainError::Conflict(_)) if attempts == 0 => attempts += 1,
                Err(err) => return Err(err.into()),
            }
        }
    }

    async fn ensure_city(
        &self,
        province: &Province,
        name: &str,
        now: DateTime<Utc>,
    ) -> ApplicationResult<City> {
        let name = CityName::new(name)?;
        if let Some(existing) = self
            .cities
            .find_by_name(province.id, name.as_str())
            .await?
        {
            return Ok(existing);
        }

        let mut attempts = 0u8;
        loop {
            let slug = self
                .slugs
                .resolve(
                    self.cities.as_ref(),
                    name.as_str(),
                    SlugScope::WithinProvince(province.id),
                    None,
                )
                .await?;
            let new_city = NewCity {
                province_id: province.id,
                name: name.clone(),
                slug,
                is_active: true,
                sort_order: 0,
                created_at: now,
                updated_at: now,
            };
            match self.cities.insert(new_city).await {
                Ok(created) => return Ok(created),
                Err(DomainError::Conflict(_)) if attempts == 0 => attempts += 1,
                Err(err) => return Err(err.into()),
            }
        }
    }
}
