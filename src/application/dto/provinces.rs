// src/application/dto/provinces.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::province::Province;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProvinceDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub schools_count: i64,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Province> for ProvinceDto {
    fn from(province: Province) -> Self {
        Self {
            id: province.id.into(),
            name: province.name.into(),
            slug: province.slug.into(),
            description: province.description,
            image_url: province.image_url,
            schools_count: province.schools_count,
            is_active: province.is_active,
            sort_order: province.sort_order,
            created_at: province.created_at,
            updated_at: province.updated_at,
        }
    }
}
