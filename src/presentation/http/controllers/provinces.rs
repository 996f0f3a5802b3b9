// src/presentation/http/controllers/provinces.rs
use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::application::commands::provinces::{CreateProvinceCommand, UpdateProvinceCommand};
use crate::application::dto::ProvinceDto;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::AdminAuthenticated;
use crate::presentation::http::state::HttpState;

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProvinceRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProvinceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ProvinceListParams {
    #[serde(default = "default_true")]
    pub include_inactive: bool,
}

#[utoipa::path(
    get,
    path = "/api/v1/provinces",
    responses((status = 200, description = "Active provinces ordered for display.", body = [ProvinceDto])),
    tag = "Provinces"
)]
pub async fn list_provinces(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<ProvinceDto>>> {
    state
        .services
        .province_queries
        .list(false)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/provinces/{slug}",
    responses(
        (status = 200, description = "Province detail.", body = ProvinceDto),
        (status = 404, description = "Unknown province slug.")
    ),
    tag = "Provinces"
)]
pub async fn get_province_by_slug(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<ProvinceDto>> {
    state
        .services
        .province_queries
        .get_by_slug(&slug)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/provinces",
    responses((status = 200, description = "All provinces, inactive included by default.", body = [ProvinceDto])),
    tag = "Admin"
)]
pub async fn admin_list_provinces(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Query(params): Query<ProvinceListParams>,
) -> HttpResult<Json<Vec<ProvinceDto>>> {
    state
        .services
        .province_queries
        .list(params.include_inactive)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/provinces",
    request_body = CreateProvinceRequest,
    responses(
        (status = 200, description = "Province created with a unique slug.", body = ProvinceDto),
        (status = 400, description = "Name rejected by validation.")
    ),
    tag = "Admin"
)]
pub async fn create_province(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Json(payload): Json<CreateProvinceRequest>,
) -> HttpResult<Json<ProvinceDto>> {
    let command = CreateProvinceCommand {
        name: payload.name,
        description: payload.description,
        image_url: payload.image_url,
        is_active: payload.is_active,
        sort_order: payload.sort_order,
    };
    state
        .services
        .province_commands
        .create(command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/provinces/{id}",
    request_body = UpdateProvinceRequest,
    responses(
        (status = 200, description = "Province updated; a rename re-derives the slug.", body = ProvinceDto),
        (status = 404, description = "Unknown province id.")
    ),
    tag = "Admin"
)]
pub async fn update_province(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProvinceRequest>,
) -> HttpResult<Json<ProvinceDto>> {
    let command = UpdateProvinceCommand {
        name: payload.name,
        description: payload.description,
        image_url: payload.image_url,
        is_active: payload.is_active,
        sort_order: payload.sort_order,
    };
    state
        .services
        .province_commands
        .update(id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/provinces/{id}",
    responses(
        (status = 200, description = "Province deleted."),
        (status = 409, description = "Province still has cities.")
    ),
    tag = "Admin"
)]
pub async fn delete_province(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .province_commands
        .delete(id)
        .await
        .into_http()?;
    Ok(Json(json!({ "status": "deleted" })))
}
