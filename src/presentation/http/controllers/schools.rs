// src/presentation/http/controllers/schools.rs
use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::application::commands::schools::{
    CreateSchoolCommand, SchoolLocation, UpdateSchoolCommand,
};
use crate::application::dto::{Page, PageRequest, SchoolDto};
use crate::application::error::ApplicationError;
use crate::application::queries::ListSchoolsQuery;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::AdminAuthenticated;
use crate::presentation::http::state::HttpState;

fn default_related_limit() -> u32 {
    6
}

#[derive(Debug, Default, Deserialize)]
pub struct SchoolListParams {
    pub province: Option<String>,
    pub city: Option<String>,
    pub verified: Option<bool>,
    pub featured: Option<bool>,
    pub service: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RelatedParams {
    #[serde(default = "default_related_limit")]
    pub limit: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSchoolRequest {
    pub name: String,
    /// Either an existing city id, or a city/province name pair that is
    /// created on demand.
    pub city_id: Option<i64>,
    pub city: Option<String>,
    pub province: Option<String>,
    #[serde(default)]
    pub price_min: Option<i64>,
    #[serde(default)]
    pub price_max: Option<i64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSchoolRequest {
    pub name: Option<String>,
    pub city_id: Option<i64>,
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
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetActiveRequest {
    pub active: bool,
}

fn location_of(payload: &CreateSchoolRequest) -> Result<SchoolLocation, HttpError> {
    match (payload.city_id, &payload.city, &payload.province) {
        (Some(id), _, _) => Ok(SchoolLocation::CityId(id)),
        (None, Some(city), Some(province)) => Ok(SchoolLocation::ByName {
            city: city.clone(),
            province: province.clone(),
        }),
        _ => Err(HttpError::from_error(ApplicationError::validation(
            "either city_id or both city and province are required",
        ))),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/schools",
    responses((status = 200, description = "Active schools, featured first, filtered and paginated.", body = Page<SchoolDto>)),
    tag = "Schools"
)]
pub async fn list_schools(
    Extension(state): Extension<HttpState>,
    Query(params): Query<SchoolListParams>,
    Query(page): Query<PageRequest>,
) -> HttpResult<Json<Page<SchoolDto>>> {
    let query = ListSchoolsQuery {
        province: params.province,
        city: params.city,
        verified: params.verified,
        featured: params.featured,
        service: params.service,
        q: params.q,
        include_inactive: false,
    };
    state
        .services
        .school_queries
        .list(query, page)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/schools/{slug}",
    responses(
        (status = 200, description = "School detail with its city and province names.", body = SchoolDto),
        (status = 404, description = "Unknown school slug.")
    ),
    tag = "Schools"
)]
pub async fn get_school_by_slug(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<SchoolDto>> {
    state
        .services
        .school_queries
        .get_by_slug(&slug)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/schools/{slug}/related",
    responses((status = 200, description = "Nearby active schools, same city first.", body = [SchoolDto])),
    tag = "Schools"
)]
pub async fn related_schools(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
    Query(params): Query<RelatedParams>,
) -> HttpResult<Json<Vec<SchoolDto>>> {
    state
        .services
        .school_queries
        .related(&slug, params.limit)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/schools",
    responses((status = 200, description = "Schools for the back-office, inactive included.", body = Page<SchoolDto>)),
    tag = "Admin"
)]
pub async fn admin_list_schools(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Query(params): Query<SchoolListParams>,
    Query(page): Query<PageRequest>,
) -> HttpResult<Json<Page<SchoolDto>>> {
    let query = ListSchoolsQuery {
        province: params.province,
        city: params.city,
        verified: params.verified,
        featured: params.featured,
        service: params.service,
        q: params.q,
        include_inactive: true,
    };
    state
        .services
        .school_queries
        .list(query, page)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/schools",
    request_body = CreateSchoolRequest,
    responses(
        (status = 200, description = "School created; counters follow when it is active.", body = SchoolDto),
        (status = 400, description = "Missing or invalid location.")
    ),
    tag = "Admin"
)]
pub async fn create_school(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Json(payload): Json<CreateSchoolRequest>,
) -> HttpResult<Json<SchoolDto>> {
    let location = location_of(&payload)?;
    let command = CreateSchoolCommand {
        name: payload.name,
        location,
        price_min: payload.price_min,
        price_max: payload.price_max,
        phone: payload.phone,
        email: payload.email,
        website: payload.website,
        address: payload.address,
        services: payload.services,
        is_active: payload.is_active,
        is_verified: payload.is_verified,
        is_featured: payload.is_featured,
        sort_order: payload.sort_order,
    };
    state
        .services
        .school_commands
        .create(command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/schools/{id}",
    request_body = UpdateSchoolRequest,
    responses(
        (status = 200, description = "School updated; a city change moves the counters with it.", body = SchoolDto),
        (status = 404, description = "Unknown school id.")
    ),
    tag = "Admin"
)]
pub async fn update_school(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSchoolRequest>,
) -> HttpResult<Json<SchoolDto>> {
    let command = UpdateSchoolCommand {
        name: payload.name,
        city_id: payload.city_id,
        rating: payload.rating,
        reviews_count: payload.reviews_count,
        price_min: payload.price_min,
        price_max: payload.price_max,
        phone: payload.phone,
        email: payload.email,
        website: payload.website,
        address: payload.address,
        services: payload.services,
        is_active: payload.is_active,
        is_verified: payload.is_verified,
        is_featured: payload.is_featured,
        sort_order: payload.sort_order,
    };
    state
        .services
        .school_commands
        .update(id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/schools/{id}/active",
    request_body = SetActiveRequest,
    responses((status = 200, description = "Visibility toggled; counters adjusted when it changed.", body = SchoolDto)),
    tag = "Admin"
)]
pub async fn set_school_active(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
    Json(payload): Json<SetActiveRequest>,
) -> HttpResult<Json<SchoolDto>> {
    state
        .services
        .school_commands
        .set_active(id, payload.active)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/schools/{id}",
    responses((status = 200, description = "School deleted and counters decremented.")),
    tag = "Admin"
)]
pub async fn delete_school(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .school_commands
        .delete(id)
        .await
        .into_http()?;
    Ok(Json(json!({ "status": "deleted" })))
}
