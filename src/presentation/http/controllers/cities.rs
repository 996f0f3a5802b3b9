// src/presentation/http/controllers/cities.rs
use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::application::commands::cities::{CreateCityCommand, UpdateCityCommand};
use crate::application::dto::CityDto;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::AdminAuthenticated;
use crate::presentation::http::state::HttpState;

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCityRequest {
    pub province_id: i64,
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCityRequest {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CityListParams {
    pub province: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdminCityListParams {
    pub province: Option<String>,
    #[serde(default = "default_true")]
    pub include_inactive: bool,
}

#[utoipa::path(
    get,
    path = "/api/v1/cities",
    responses((status = 200, description = "Active cities, optionally narrowed to one province.", body = [CityDto])),
    tag = "Cities"
)]
pub async fn list_cities(
    Extension(state): Extension<HttpState>,
    Query(params): Query<CityListParams>,
) -> HttpResult<Json<Vec<CityDto>>> {
    state
        .services
        .city_queries
        .list(params.province.as_deref(), false)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/provinces/{province_slug}/cities/{city_slug}",
    responses(
        (status = 200, description = "City detail; the slug is only unique within its province.", body = CityDto),
        (status = 404, description = "Unknown province or city slug.")
    ),
    tag = "Cities"
)]
pub async fn get_city_by_slug(
    Extension(state): Extension<HttpState>,
    Path((province_slug, city_slug)): Path<(String, String)>,
) -> HttpResult<Json<CityDto>> {
    state
        .services
        .city_queries
        .get_by_slug(&province_slug, &city_slug)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/cities",
    responses((status = 200, description = "Cities for the back-office, inactive included by default.", body = [CityDto])),
    tag = "Admin"
)]
pub async fn admin_list_cities(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Query(params): Query<AdminCityListParams>,
) -> HttpResult<Json<Vec<CityDto>>> {
    state
        .services
        .city_queries
        .list(params.province.as_deref(), params.include_inactive)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/cities",
    request_body = CreateCityRequest,
    responses(
        (status = 200, description = "City created with a slug unique within its province.", body = CityDto),
        (status = 404, description = "Unknown province id.")
    ),
    tag = "Admin"
)]
pub async fn create_city(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Json(payload): Json<CreateCityRequest>,
) -> HttpResult<Json<CityDto>> {
    let command = CreateCityCommand {
        province_id: payload.province_id,
        name: payload.name,
        is_active: payload.is_active,
        sort_order: payload.sort_order,
    };
    state
        .services
        .city_commands
        .create(command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/cities/{id}",
    request_body = UpdateCityRequest,
    responses(
        (status = 200, description = "City updated; the province assignment never changes.", body = CityDto),
        (status = 404, description = "Unknown city id.")
    ),
    tag = "Admin"
)]
pub async fn update_city(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCityRequest>,
) -> HttpResult<Json<CityDto>> {
    let command = UpdateCityCommand {
        name: payload.name,
        is_active: payload.is_active,
        sort_order: payload.sort_order,
    };
    state
        .services
        .city_commands
        .update(id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/cities/{id}",
    responses(
        (status = 200, description = "City deleted."),
        (status = 409, description = "City still has schools, active or not.")
    ),
    tag = "Admin"
)]
pub async fn delete_city(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<serde_json::Value>> {
    state.services.city_commands.delete(id).await.into_http()?;
    Ok(Json(json!({ "status": "deleted" })))
}
