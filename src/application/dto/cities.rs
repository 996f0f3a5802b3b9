// src/application/dto/cities.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::city::City;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CityDto {
    pub id: i64,
    pub province_id: i64,
    pub name: String,
    pub slug: String,
    pub schools_count: i64,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<City> for CityDto {
    fn from(city: City) -> Self {
        Self {
            id: city.id.into(),
            province_id: city.province_id.into(),
            name: city.name.into(),
            slug: city.slug.into(),
            schools_count: city.schools_count,
            is_active: city.is_active,
            sort_order: city.sort_order,
            created_at: city.created_at,
            updated_at: city.updated_at,
        }
    }
}
