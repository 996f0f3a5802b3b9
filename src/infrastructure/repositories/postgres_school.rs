// src/infrastructure/repositories/postgres_school.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::map_sqlx;
use crate::domain::city::CityId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::province::ProvinceId;
use crate::domain::school::{
    NewSchool, School, SchoolFilter, SchoolId, SchoolName, SchoolRepository, SchoolUpdate,
    SchoolView,
};
use crate::domain::slug::{Slug, SlugProbe, SlugScope};

const COLUMNS: &str = "s.id, s.name, s.slug, s.city_id, s.province_id, s.rating, \
                       s.reviews_count, s.price_min, s.price_max, s.phone, s.email, \
                       s.website, s.address, s.services, s.is_active, s.is_verified, \
                       s.is_featured, s.sort_order, s.created_at, s.updated_at";

const VIEW_COLUMNS: &str = "s.id, s.name, s.slug, s.city_id, s.province_id, s.rating, \
                            s.reviews_count, s.price_min, s.price_max, s.phone, s.email, \
                            s.website, s.address, s.services, s.is_active, s.is_verified, \
                            s.is_featured, s.sort_order, s.created_at, s.updated_at, \
                            c.name AS city_name, c.slug AS city_slug, \
                            p.name AS province_name, p.slug AS province_slug";

const VIEW_JOIN: &str = "FROM schools s
                         JOIN cities c ON c.id = s.city_id
                         JOIN provinces p ON p.id = s.province_id";

/// Listings are featured-first, then explicit ordering, then recency.
const VIEW_ORDER: &str = " ORDER BY s.is_featured DESC, s.sort_order, s.created_at DESC, s.id DESC";

#[derive(Clone)]
pub struct PostgresSchoolRepository {
    pool: PgPool,
}

impl PostgresSchoolRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SchoolRow {
    id: i64,
    name: String,
    slug: String,
    city_id: i64,
    province_id: i64,
    rating: f64,
    reviews_count: i32,
    price_min: Option<i64>,
    price_max: Option<i64>,
    phone: Option<String>,
    email: Option<String>,
    website: Option<String>,
    address: Option<String>,
    services: Vec<String>,
    is_active: bool,
    is_verified: bool,
    is_featured: bool,
    sort_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SchoolRow> for School {
    type Error = DomainError;

    fn try_from(row: SchoolRow) -> Result<Self, Self::Error> {
        Ok(School {
            id: SchoolId::new(row.id)?,
            name: SchoolName::new(row.name)?,
            slug: Slug::new(row.slug)?,
            city_id: CityId::new(row.city_id)?,
            province_id: ProvinceId::new(row.province_id)?,
            rating: row.rating,
            reviews_count: row.reviews_count,
            price_min: row.price_min,
            price_max: row.price_max,
            phone: row.phone,
            email: row.email,
            website: row.website,
            address: row.address,
            services: row.services,
            is_active: row.is_active,
            is_verified: row.is_verified,
            is_featured: row.is_featured,
            sort_order: row.sort_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct SchoolViewRow {
    #[sqlx(flatten)]
    school: SchoolRow,
    city_name: String,
    city_slug: String,
    province_name: String,
    province_slug: String,
}

impl TryFrom<SchoolViewRow> for SchoolView {
    type Error = DomainError;

    fn try_from(row: SchoolViewRow) -> Result<Self, Self::Error> {
        Ok(SchoolView {
            school: School::try_from(row.school)?,
            city_name: row.city_name,
            city_slug: row.city_slug,
            province_name: row.province_name,
            province_slug: row.province_slug,
        })
    }
}

fn apply_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &'a SchoolFilter) {
    builder.push(" WHERE TRUE");
    if filter.only_active {
        builder.push(" AND s.is_active");
    }
    if let Some(province_slug) = &filter.province_slug {
        builder.push(" AND p.slug = ");
        builder.push_bind(province_slug);
    }
    if let Some(city_slug) = &filter.city_slug {
        builder.push(" AND c.slug = ");
        builder.push_bind(city_slug);
    }
    if let Some(verified) = filter.verified {
        builder.push(" AND s.is_verified = ");
        builder.push_bind(verified);
    }
    if let Some(featured) = filter.featured {
        builder.push(" AND s.is_featured = ");
        builder.push_bind(featured);
    }
    if let Some(service) = &filter.service {
        builder.push(" AND ");
        builder.push_bind(service);
        builder.push(" = ANY(s.services)");
    }
    if let Some(query) = &filter.name_query {
        builder.push(" AND s.name ILIKE '%' || ");
        builder.push_bind(query);
        builder.push(" || '%'");
    }
}

#[async_trait]
impl SlugProbe for PostgresSchoolRepository {
    async fn slug_taken(
        &self,
        candidate: &str,
        _scope: SlugScope,
        exclude_id: Option<i64>,
    ) -> DomainResult<bool> {
        let exists: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM schools WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)",
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
impl SchoolRepository for PostgresSchoolRepository {
    async fn insert(&self, school: NewSchool) -> DomainResult<School> {
        let row = sqlx::query_as::<_, SchoolRow>(&format!(
            "INSERT INTO schools AS s
                 (name, slug, city_id, province_id, rating, reviews_count, price_min, price_max,
                  phone, email, website, address, services, is_active, is_verified, is_featured,
                  sort_order, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
             RETURNING {COLUMNS}"
        ))
        .bind(school.name.as_str())
        .bind(school.slug.as_str())
        .bind(i64::from(school.city_id))
        .bind(i64::from(school.province_id))
        .bind(school.rating)
        .bind(school.reviews_count)
        .bind(school.price_min)
        .bind(school.price_max)
        .bind(&school.phone)
        .bind(&school.email)
        .bind(&school.website)
        .bind(&school.address)
        .bind(&school.services)
        .bind(school.is_active)
        .bind(school.is_verified)
        .bind(school.is_featured)
        .bind(school.sort_order)
        .bind(school.created_at)
        .bind(school.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        School::try_from(row)
    }

    async fn update(&self, update: SchoolUpdate) -> DomainResult<School> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE schools AS s SET updated_at = ");
        builder.push_bind(update.updated_at);

        if let Some(name) = update.name {
            builder.push(", name = ");
            builder.push_bind(String::from(name));
        }
        if let Some(slug) = update.slug {
            builder.push(", slug = ");
            builder.push_bind(String::from(slug));
        }
        if let Some((city_id, province_id)) = update.city_move {
            builder.push(", city_id = ");
            builder.push_bind(i64::from(city_id));
            builder.push(", province_id = ");
            builder.push_bind(i64::from(province_id));
        }
        if let Some(rating) = update.rating {
            builder.push(", rating = ");
            builder.push_bind(rating);
        }
        if let Some(reviews_count) = update.reviews_count {
            builder.push(", reviews_count = ");
            builder.push_bind(reviews_count);
        }
        if let Some(price_min) = update.price_min {
            builder.push(", price_min = ");
            builder.push_bind(price_min);
        }
        if let Some(price_max) = update.price_max {
            builder.push(", price_max = ");
            builder.push_bind(price_max);
        }
        if let Some(phone) = update.phone {
            builder.push(", phone = ");
            builder.push_bind(phone);
        }
        if let Some(email) = update.email {
            builder.push(", email = ");
            builder.push_bind(email);
        }
        if let Some(website) = update.website {
            builder.push(", website = ");
            builder.push_bind(website);
        }
        if let Some(address) = update.address {
            builder.push(", address = ");
            builder.push_bind(address);
        }
        if let Some(services) = update.services {
            builder.push(", services = ");
            builder.push_bind(services);
        }
        if let Some(is_active) = update.is_active {
            builder.push(", is_active = ");
            builder.push_bind(is_active);
        }
        if let Some(is_verified) = update.is_verified {
            builder.push(", is_verified = ");
            builder.push_bind(is_verified);
        }
        if let Some(is_featured) = update.is_featured {
            builder.push(", is_featured = ");
            builder.push_bind(is_featured);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(update.id));
        builder.push(format!(" RETURNING {COLUMNS}"));

        let row = builder
            .build_query_as::<SchoolRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("school not found".into()))?;

        School::try_from(row)
    }

    async fn delete(&self, id: SchoolId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM schools WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("school not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: SchoolId) -> DomainResult<Option<School>> {
        let row = sqlx::query_as::<_, SchoolRow>(&format!(
            "SELECT {COLUMNS} FROM schools s WHERE s.id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(School::try_from).transpose()
    }

    async fn find_view_by_id(&self, id: SchoolId) -> DomainResult<Option<SchoolView>> {
        let row = sqlx::query_as::<_, SchoolViewRow>(&format!(
            "SELECT {VIEW_COLUMNS} {VIEW_JOIN} WHERE s.id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(SchoolView::try_from).transpose()
    }

    async fn find_view_by_slug(&self, slug: &Slug) -> DomainResult<Option<SchoolView>> {
        let row = sqlx::query_as::<_, SchoolViewRow>(&format!(
            "SELECT {VIEW_COLUMNS} {VIEW_JOIN} WHERE s.slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(SchoolView::try_from).transpose()
    }

    async fn list_views(
        &self,
        filter: &SchoolFilter,
        limit: i64,
        offset: i64,
    ) -> DomainResult<(Vec<SchoolView>, i64)> {
        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT COUNT(*) {VIEW_JOIN}"));
        apply_filter(&mut count_builder, filter);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {VIEW_COLUMNS} {VIEW_JOIN}"));
        apply_filter(&mut builder, filter);
        builder.push(VIEW_ORDER);
        builder.push(" LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder
            .build_query_as::<SchoolViewRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let views = rows
            .into_iter()
            .map(SchoolView::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((views, total))
    }

    async fn related_views(
        &self,
        city_id: CityId,
        province_id: ProvinceId,
        exclude: SchoolId,
        limit: i64,
    ) -> DomainResult<Vec<SchoolView>> {
        let rows = sqlx::query_as::<_, SchoolViewRow>(&format!(
            "SELECT {VIEW_COLUMNS} {VIEW_JOIN}
             WHERE s.is_active AND s.id <> $1 AND (s.city_id = $2 OR s.province_id = $3)
             ORDER BY (s.city_id = $2) DESC, s.is_featured DESC, s.sort_order, s.created_at DESC
             LIMIT $4"
        ))
        .bind(i64::from(exclude))
        .bind(i64::from(city_id))
        .bind(i64::from(province_id))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(SchoolView::try_from).collect()
    }

    async fn count_by_city(&self, city_id: CityId, active_only: bool) -> DomainResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM schools WHERE city_id = $1 AND ($2 = FALSE OR is_active)",
        )
        .bind(i64::from(city_id))
        .bind(active_only)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(count)
    }

    async fn count_by_province(
        &self,
        province_id: ProvinceId,
        active_only: bool,
    ) -> DomainResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM schools WHERE province_id = $1 AND ($2 = FALSE OR is_active)",
        )
        .bind(i64::from(province_id))
        .bind(active_only)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(count)
    }
}
