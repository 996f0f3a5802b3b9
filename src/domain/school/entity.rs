// src/domain/school/entity.rs
use chrono::{DateTime, Utc};

use crate::domain::city::CityId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::province::ProvinceId;
use crate::domain::slug::Slug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchoolId(pub i64);

impl SchoolId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("school id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<SchoolId> for i64 {
    fn from(value: SchoolId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolName(String);

impl SchoolName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation(
                "school name cannot be empty".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<SchoolName> for String {
    fn from(value: SchoolName) -> Self {
        value.0
    }
}

/// A driving school. `province_id` is a materialized copy of the owning
/// city's province and is only ever written by the school command service,
/// which derives it from the city row.
#[derive(Debug, Clone)]
pub struct School {
    pub id: SchoolId,
    pub name: SchoolName,
    pub slug: Slug,
    pub city_id: CityId,
    pub province_id: ProvinceId,
    pub rating: f64,
    pub reviews_count: i32,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub services: Vec<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl School {
    /// Whether this row contributes to the cached `schools_count` of its
    /// city and province.
    pub fn counts_toward_aggregates(&self) -> bool {
        self.is_active
    }
}

#[derive(Debug, Clone)]
pub struct NewSchool {
    pub name: SchoolName,
    pub slug: Slug,
    pub city_id: CityId,
    pub province_id: ProvinceId,
    pub rating: f64,
    pub reviews_count: i32,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub services: Vec<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update: `None` fields are left untouched. `city_id` changes come
/// paired with the recomputed `province_id` of the new city.
#[derive(Debug, Clone)]
pub struct SchoolUpdate {
    pub id: SchoolId,
    pub name: Option<SchoolName>,
    pub slug: Option<Slug>,
    pub city_move: Option<(CityId, ProvinceId)>,
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
    pub updated_at: DateTime<Utc>,
}

impl SchoolUpdate {
    pub fn new(id: SchoolId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: None,
            slug: None,
            city_move: None,
            rating: None,
            reviews_count: None,
            price_min: None,
            price_max: None,
            phone: None,
            email: None,
            website: None,
            address: None,
            services: None,
            is_active: None,
            is_verified: None,
            is_featured: None,
            sort_order: None,
            updated_at,
        }
    }
}

/// Read model for presentation: the school with its city and province names
/// flattened on, so API consumers never see raw foreign keys.
#[derive(Debug, Clone)]
pub struct SchoolView {
    pub school: School,
    pub city_name: String,
    pub city_slug: String,
    pub province_name: String,
    pub province_slug: String,
}
