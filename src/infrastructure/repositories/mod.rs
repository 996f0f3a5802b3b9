// src/infrastructure/repositories/mod.rs
mod postgres_article;
mod postgres_city;
mod postgres_contact;
mod postgres_province;
mod postgres_school;

pub use postgres_article::PostgresArticleRepository;
pub use postgres_city::PostgresCityRepository;
pub use postgres_contact::PostgresContactRepository;
pub use postgres_province::PostgresProvinceRepository;
pub use postgres_school::PostgresSchoolRepository;

use crate::domain::errors::DomainError;

const CNT_PROVINCE_SLUG: &str = "provinces_slug_key";
const CNT_CITY_SLUG: &str = "cities_province_id_slug_key";
const CNT_SCHOOL_SLUG: &str = "schools_slug_key";
const CNT_ARTICLE_SLUG: &str = "articles_slug_key";
const CNT_CITY_PROVINCE: &str = "cities_province_id_fkey";
const CNT_SCHOOL_CITY: &str = "schools_city_id_fkey";
const CNT_SCHOOL_PROVINCE: &str = "schools_province_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_PROVINCE_SLUG | CNT_CITY_SLUG | CNT_SCHOOL_SLUG | CNT_ARTICLE_SLUG => {
                        DomainError::Conflict("slug already exists".into())
                    }
                    CNT_CITY_PROVINCE => DomainError::NotFound("province not found".into()),
                    CNT_SCHOOL_CITY => DomainError::NotFound("city not found".into()),
                    CNT_SCHOOL_PROVINCE => DomainError::NotFound("province not found".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
