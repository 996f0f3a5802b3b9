// src/infrastructure/repositories/postgres_city.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::map_sqlx;
use crate::domain::city::{City, CityId, CityName, CityRepository, CityUpdate, NewCity};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::province::ProvinceId;
use crate::domain::slug::{Slug, SlugProbe, SlugScope};

const COLUMNS: &str = "id, province_id, name, slug, schools_count, is_active, sort_order, \
                       created_at, updated_at";

#[derive(Clone)]
pub struct PostgresCityRepository {
    pool: PgPool,
}

impl PostgresCityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CityRow {
    id: i64,
    province_id: i64,
    name: String,
    slug: String,
    schools_count: i64,
    is_active: bool,
    sort_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CityRow> for City {
    type Error = DomainError;

    fn try_from(row: CityRow) -> Result<Self, Self::Error> {
        Ok(City {
            id: CityId::new(row.id)?,
            province_id: ProvinceId::new(row.province_id)?,
            name: CityName::new(row.name)?,
            slug: Slug::new(row.slug)?,
            schools_count: row.schools_count,
            is_active: row.is_active,
            sort_order: row.sort_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl SlugProbe for PostgresCityRepository {
    async fn slug_taken(
        &self,
        candidate: &str,
        scope: SlugScope,
        exclude_id: Option<i64>,
    ) -> DomainResult<bool> {
        let province_id = match scope {
            SlugScope::WithinProvince(id) => i64::from(id),
            SlugScope::Global => {
                return Err(DomainError::Validation(
                    "city slugs are scoped to a province".into(),
                ));
            }
        };

        let exists: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM cities
             WHERE province_id = $1 AND slug = $2 AND ($3::BIGINT IS NULL OR id <> $3)",
        )
        .bind(province_id)
        .bind(candidate)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(exists.is_some())
    }
}

#[async_trait]
impl CityRepository for PostgresCityRepository {
    async fn insert(&self, city: NewCity) -> DomainResult<City> {
        let row = sqlx::query_as::<_, CityRow>(&format!(
            "INSERT INTO cities (province_id, name, slug, is_active, sort_order, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        ))
        .bind(i64::from(city.province_id))
        .bind(city.name.as_str())
        .bind(city.slug.as_str())
        .bind(city.is_active)
        .bind(city.sort_order)
        .bind(city.created_at)
        .bind(city.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        City::try_from(row)
    }

    async fn update(&self, update: CityUpdate) -> DomainResult<City> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE cities SET updated_at = ");
        builder.push_bind(update.updated_at);

        if let Some(name) = update.name {
            builder.push(", name = ");
            builder.push_bind(String::from(name));
        }
        if let Some(slug) = update.slug {
            builder.push(", slug = ");
            builder.push_bind(String::from(slug));
        }
        if let Some(is_active) = update.is_active {
            builder.push(", is_active = ");
            builder.push_bind(is_active);
        }
        if let Some(sort_order) = update.sort_order {
            builder.push(", sort_order = ");
            builder.push_bind(sort_order);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(update.id));
        builder.push(format!(" RETURNING {COLUMNS}"));

        let row = builder
            .build_query_as::<CityRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("city not found".into()))?;

        City::try_from(row)
    }

    async fn delete(&self, id: CityId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("city not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: CityId) -> DomainResult<Option<City>> {
        let row =
            sqlx::query_as::<_, CityRow>(&format!("SELECT {COLUMNS} FROM cities WHERE id = $1"))
                .bind(i64::from(id))
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?;
        row.map(City::try_from).transpose()
    }

    async fn find_by_slug(
        &self,
        province_id: ProvinceId,
        slug: &Slug,
    ) -> DomainResult<Option<City>> {
        let row = sqlx::query_as::<_, CityRow>(&format!(
            "SELECT {COLUMNS} FROM cities WHERE province_id = $1 AND slug = $2"
        ))
        .bind(i64::from(province_id))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(City::try_from).transpose()
    }

    async fn find_by_name(
        &self,
        province_id: ProvinceId,
        name: &str,
    ) -> DomainResult<Option<City>> {
        let row = sqlx::query_as::<_, CityRow>(&format!(
            "SELECT {COLUMNS} FROM cities WHERE province_id = $1 AND name = $2"
        ))
        .bind(i64::from(province_id))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(City::try_from).transpose()
    }

    async fn list(
        &self,
        province_id: Option<ProvinceId>,
        include_inactive: bool,
    ) -> DomainResult<Vec<City>> {
        let rows = sqlx::query_as::<_, CityRow>(&format!(
            "SELECT {COLUMNS} FROM cities
             WHERE ($1::BIGINT IS NULL OR province_id = $1) AND ($2 OR is_active)
             ORDER BY sort_order, name"
        ))
        .bind(province_id.map(i64::from))
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        rows.into_iter().map(City::try_from).collect()
    }

    async fn adjust_schools_count(&self, id: CityId, delta: i64) -> DomainResult<()> {
        sqlx::query(
            "UPDATE cities SET schools_count = GREATEST(schools_count + $2, 0) WHERE id = $1",
        )
        .bind(i64::from(id))
        .bind(delta)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }

    async fn set_schools_count(&self, id: CityId, count: i64) -> DomainResult<()> {
        sqlx::query("UPDATE cities SET schools_count = $2 WHERE id = $1")
            .bind(i64::from(id))
            .bind(count)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}
