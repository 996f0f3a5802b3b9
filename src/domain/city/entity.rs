// src/domain/city/entity.rs
use chrono::{DateTime, Utc};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::province::ProvinceId;
use crate::domain::slug::Slug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CityId(pub i64);

impl CityId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("city id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<CityId> for i64 {
    fn from(value: CityId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityName(String);

impl CityName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("city name cannot be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<CityName> for String {
    fn from(value: CityName) -> Self {
        value.0
    }
}

/// A city belongs to exactly one province for its whole life; its slug is
/// unique only among the cities of that province.
#[derive(Debug, Clone)]
pub struct City {
    pub id: CityId,
    pub province_id: ProvinceId,
    pub name: CityName,
    pub slug: Slug,
    pub schools_count: i64,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCity {
    pub province_id: ProvinceId,
    pub name: CityName,
    pub slug: Slug,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update: `None` fields are left untouched. The owning province is
/// deliberately not updatable (see DESIGN notes).
#[derive(Debug, Clone)]
pub struct CityUpdate {
    pub id: CityId,
    pub name: Option<CityName>,
    pub slug: Option<Slug>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

impl CityUpdate {
    pub fn new(id: CityId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: None,
            slug: None,
            is_active: None,
            sort_order: None,
            updated_at,
        }
    }
}
