// src/infrastructure/repositories/postgres_province.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::province::{
    NewProvince, Province, ProvinceId, ProvinceName, ProvinceRepository, ProvinceUpdate,
};
use crate::domain::slug::{Slug, SlugProbe, SlugScope};

const COLUMNS: &str = "id, name, slug, description, image_url, schools_count, is_active, \
                       sort_order, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresProvinceRepository {
    pool: PgPool,
}

impl PostgresProvinceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProvinceRow {
    id: i64,
    name: String,
    slug: String,
    description: Option<String>,
    image_url: Option<String>,
    schools_count: i64,
    is_active: bool,
    sort_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProvinceRow> for Province {
    type Error = DomainError;

    fn try_from(row: ProvinceRow) -> Result<Self, Self::Error> {
        Ok(Province {
            id: ProvinceId::new(row.id)?,
            name: ProvinceName::new(row.name)?,
            slug: Slug::new(row.slug)?,
            description: row.description,
            image_url: row.image_url,
            schools_count: row.schools_count,
            is_active: row.is_active,
            sort_order: row.sort_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl SlugProbe for PostgresProvinceRepository {
    async fn slug_taken(
        &self,
        candidate: &str,
        _scope: SlugScope,
        exclude_id: Option<i64>,
    ) -> DomainResult<bool> {
        let exists: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM provinces WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)",
        )
        .bind(candidate)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(exists.is_some())
    }
}

#[async_trait]
impl ProvinceRepository for PostgresProvinceRepository {
    async fn insert(&self, province: NewProvince) -> DomainResult<Province> {
        let row = sqlx::query_as::<_, ProvinceRow>(&format!(
            "INSERT INTO provinces (name, slug, description, image_url, is_active, sort_order, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        ))
        .bind(province.name.as_str())
        .bind(province.slug.as_str())
        .bind(&province.description)
        .bind(&province.image_url)
        .bind(province.is_active)
        .bind(province.sort_order)
        .bind(province.created_at)
        .bind(province.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Province::try_from(row)
    }

    async fn update(&self, update: ProvinceUpdate) -> DomainResult<Province> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE provinces SET updated_at = ");
        builder.push_bind(update.updated_at);

        if let Some(name) = update.name {
            builder.push(", name = ");
            builder.push_bind(String::from(name));
        }
        if let Some(slug) = update.slug {
            builder.push(", slug = ");
            builder.push_bind(String::from(slug));
        }
        if let Some(description) = update.description {
            builder.push(", description = ");
            builder.push_bind(description);
        }
        if let Some(image_url) = update.image_url {
            builder.push(", image_url = ");
            builder.push_bind(image_url);
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
            .build_query_as::<ProvinceRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("province not found".into()))?;

        Province::try_from(row)
    }

    async fn delete(&self, id: ProvinceId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM provinces WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("province not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: ProvinceId) -> DomainResult<Option<Province>> {
        let row = sqlx::query_as::<_, ProvinceRow>(&format!(
            "SELECT {COLUMNS} FROM provinces WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(Province::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Province>> {
        let row = sqlx::query_as::<_, ProvinceRow>(&format!(
            "SELECT {COLUMNS} FROM provinces WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(Province::try_from).transpose()
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Province>> {
        let row = sqlx::query_as::<_, ProvinceRow>(&format!(
            "SELECT {COLUMNS} FROM provinces WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(Province::try_from).transpose()
    }

    async fn list(&self, include_inactive: bool) -> DomainResult<Vec<Province>> {
        let rows = sqlx::query_as::<_, ProvinceRow>(&format!(
            "SELECT {COLUMNS} FROM provinces
             WHERE ($1 OR is_active)
             ORDER BY sort_order, name"
        ))
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        rows.into_iter().map(Province::try_from).collect()
    }

    async fn adjust_schools_count(&self, id: ProvinceId, delta: i64) -> DomainResult<()> {
        sqlx::query(
            "UPDATE provinces SET schools_count = GREATEST(schools_count + $2, 0) WHERE id = $1",
        )
        .bind(i64::from(id))
        .bind(delta)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }

    async fn set_schools_count(&self, id: ProvinceId, count: i64) -> DomainResult<()> {
        sqlx::query("UPDATE provinces SET schools_count = $2 WHERE id = $1")
            .bind(i64::from(id))
            .bind(count)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}
