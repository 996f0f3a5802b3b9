// src/application/dto/search.rs
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::city::City;
use crate::domain::province::Province;
use crate::domain::school::SchoolView;

/// Flat search document for a school: denormalized names, no foreign keys.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchSchoolDoc {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub city: String,
    pub province: String,
    pub services: Vec<String>,
    pub rating: f64,
    pub is_verified: bool,
    pub is_featured: bool,
}

impl From<SchoolView> for SearchSchoolDoc {
    fn from(view: SchoolView) -> Self {
        let school = view.school;
        Self {
            id: school.id.into(),
            name: school.name.into(),
            slug: school.slug.into(),
            city: view.city_name,
            province: view.province_name,
            services: school.services,
            rating: school.rating,
            is_verified: school.is_verified,
            is_featured: school.is_featured,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchProvinceDoc {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub schools_count: i64,
}

impl From<Province> for SearchProvinceDoc {
    fn from(province: Province) -> Self {
        Self {
            id: province.id.into(),
            name: province.name.into(),
            slug: province.slug.into(),
            schools_count: province.schools_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchCityDoc {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub province: String,
    pub schools_count: i64,
}

impl SearchCityDoc {
    pub fn from_city(city: City, province_name: String) -> Self {
        Self {
            id: city.id.into(),
            name: city.name.into(),
            slug: city.slug.into(),
            province: province_name,
            schools_count: city.schools_count,
        }
    }
}

/// Everything the external search collaborator needs to rebuild its three
/// indexes from scratch.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchProjection {
    pub schools: Vec<SearchSchoolDoc>,
    pub provinces: Vec<SearchProvinceDoc>,
    pub cities: Vec<SearchCityDoc>,
}
