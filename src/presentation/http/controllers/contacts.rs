// src/presentation/http/controllers/contacts.rs
use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::application::commands::contacts::{SubmitContactCommand, UpdateContactCommand};
use crate::application::dto::{ContactDto, Page, PageRequest};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::AdminAuthenticated;
use crate::presentation::http::state::HttpState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitContactRequest {
    pub school_id: Option<i64>,
    pub school_name: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateContactRequest {
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactListParams {
    pub status: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/contacts",
    request_body = SubmitContactRequest,
    responses(
        (status = 200, description = "Lead stored with a snapshot of the school name.", body = ContactDto),
        (status = 400, description = "Malformed email, phone, or missing school reference.")
    ),
    tag = "Contacts"
)]
pub async fn submit_contact(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<SubmitContactRequest>,
) -> HttpResult<Json<ContactDto>> {
    let command = SubmitContactCommand {
        school_id: payload.school_id,
        school_name: payload.school_name,
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        message: payload.message,
    };
    state
        .services
        .contact_commands
        .submit(command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/contacts",
    responses((status = 200, description = "Leads newest first, optionally filtered by status.", body = Page<ContactDto>)),
    tag = "Admin"
)]
pub async fn admin_list_contacts(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Query(params): Query<ContactListParams>,
    Query(page): Query<PageRequest>,
) -> HttpResult<Json<Page<ContactDto>>> {
    state
        .services
        .contact_queries
        .list(params.status.as_deref(), page)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/contacts/{id}",
    responses(
        (status = 200, description = "Lead detail.", body = ContactDto),
        (status = 404, description = "Unknown contact id.")
    ),
    tag = "Admin"
)]
pub async fn admin_get_contact(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ContactDto>> {
    state
        .services
        .contact_queries
        .get(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/contacts/{id}",
    request_body = UpdateContactRequest,
    responses(
        (status = 200, description = "Lead status and notes updated.", body = ContactDto),
        (status = 400, description = "Unknown status value.")
    ),
    tag = "Admin"
)]
pub async fn update_contact(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateContactRequest>,
) -> HttpResult<Json<ContactDto>> {
    let command = UpdateContactCommand {
        status: payload.status,
        notes: payload.notes,
    };
    state
        .services
        .contact_commands
        .update(id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/contacts/{id}",
    responses((status = 200, description = "Lead deleted.")),
    tag = "Admin"
)]
pub async fn delete_contact(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .contact_commands
        .delete(id)
        .await
        .into_http()?;
    Ok(Json(json!({ "status": "deleted" })))
}
