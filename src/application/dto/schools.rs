// src/application/dto/schools.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::school::SchoolView;

/// Denormalized presentation shape: city and province appear as names and
/// slugs, never as raw foreign keys.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SchoolDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub city: String,
    pub city_slug: String,
    pub province: String,
    pub province_slug: String,
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

impl From<SchoolView> for SchoolDto {
    fn from(view: SchoolView) -> Self {
        let school = view.school;
        Self {
            id: school.id.into(),
            name: school.name.into(),
            slug: school.slug.into(),
            city: view.city_name,
            city_slug: view.city_slug,
            province: view.province_name,
            province_slug: view.province_slug,
            rating: school.rating,
            reviews_count: school.reviews_count,
            price_min: school.price_min,
            price_max: school.price_max,
            phone: school.phone,
            email: school.email,
            website: school.website,
            address: school.address,
            services: school.services,
            is_active: school.is_active,
            is_verified: school.is_verified,
            is_featured: school.is_featured,
            sort_order: school.sort_order,
            created_at: school.created_at,
            updated_at: school.updated_at,
        }
    }
}
