// src/domain/province/entity.rs
use chrono::{DateTime, Utc};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::Slug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProvinceId(pub i64);

impl ProvinceId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "province id must be positive".into(),
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ProvinceId> for i64 {
    fn from(value: ProvinceId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvinceName(String);

impl ProvinceName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation(
                "province name cannot be empty".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ProvinceName> for String {
    fn from(value: ProvinceName) -> Self {
        value.0
    }
}

/// `schools_count` mirrors the number of active schools in the province. It
/// is a cached aggregate maintained by the counter service; the live school
/// rows stay the source of truth.
#[derive(Debug, Clone)]
pub struct Province {
    pub id: ProvinceId,
    pub name: ProvinceName,
    pub slug: Slug,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub schools_count: i64,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProvince {
    pub name: ProvinceName,
    pub slug: Slug,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update: `None` fields are left untouched by the repository.
#[derive(Debug, Clone)]
pub struct ProvinceUpdate {
    pub id: ProvinceId,
    pub name: Option<ProvinceName>,
    pub slug: Option<Slug>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

impl ProvinceUpdate {
    pub fn new(id: ProvinceId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: None,
            slug: None,
            description: None,
            image_url: None,
            is_active: None,
            sort_order: None,
            updated_at,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.is_active.is_none()
            && self.sort_order.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed_and_non_empty() {
        assert_eq!(ProvinceName::new("  Córdoba ").unwrap().as_str(), "Córdoba");
        assert!(ProvinceName::new("   ").is_err());
    }

    #[test]
    fn id_must_be_positive() {
        assert!(ProvinceId::new(0).is_err());
        assert!(ProvinceId::new(-3).is_err());
        assert_eq!(i64::from(ProvinceId::new(7).unwrap()), 7);
    }
}
