// src/presentation/http/controllers/maintenance.rs
use axum::{Extension, Json};

use crate::application::commands::maintenance::{ReconcileCountsOutcome, ReindexOutcome};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::AdminAuthenticated;
use crate::presentation::http::state::HttpState;

#[utoipa::path(
    post,
    path = "/api/v1/admin/maintenance/reconcile-counts",
    responses((status = 200, description = "Cached school counters overwritten from live rows.", body = ReconcileCountsOutcome)),
    tag = "Admin"
)]
pub async fn reconcile_counts(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
) -> HttpResult<Json<ReconcileCountsOutcome>> {
    state
        .services
        .maintenance
        .reconcile_counts()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/maintenance/reindex-search",
    responses((status = 200, description = "Search indexes rebuilt; a failed push is reported, not fatal.", body = ReindexOutcome)),
    tag = "Admin"
)]
pub async fn reindex_search(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
) -> HttpResult<Json<ReindexOutcome>> {
    state
        .services
        .maintenance
        .reindex_search()
        .await
        .into_http()
        .map(Json)
}
