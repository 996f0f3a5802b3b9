// src/presentation/http/routes.rs
use std::time::Duration;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Extension, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::presentation::http::controllers::{
    articles, auth, cities, contacts, maintenance, media, provinces, schools, sitemap,
};
use crate::presentation::http::openapi::{self, StatusResponse};
use crate::presentation::http::state::HttpState;

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    let cors = cors_layer(allowed_origins);

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        // public directory
        .route("/api/v1/provinces", get(provinces::list_provinces))
        .route(
            "/api/v1/provinces/{slug}",
            get(provinces::get_province_by_slug),
        )
        .route("/api/v1/cities", get(cities::list_cities))
        .route(
            "/api/v1/provinces/{province_slug}/cities/{city_slug}",
            get(cities::get_city_by_slug),
        )
        .route("/api/v1/schools", get(schools::list_schools))
        .route("/api/v1/schools/{slug}", get(schools::get_school_by_slug))
        .route(
            "/api/v1/schools/{slug}/related",
            get(schools::related_schools),
        )
        .route("/api/v1/contacts", post(contacts::submit_contact))
        .route("/api/v1/articles", get(articles::list_articles))
        .route(
            "/api/v1/articles/{slug}",
            get(articles::get_article_by_slug),
        )
        .route("/api/v1/sitemap", get(sitemap::sitemap))
        // admin back-office
        .route("/api/v1/admin/login", post(auth::login))
        .route("/api/v1/admin/logout", post(auth::logout))
        .route("/api/v1/admin/session", get(auth::session))
        .route(
            "/api/v1/admin/provinces",
            get(provinces::admin_list_provinces).post(provinces::create_province),
        )
        .route(
            "/api/v1/admin/provinces/{id}",
            put(provinces::update_province).delete(provinces::delete_province),
        )
        .route(
            "/api/v1/admin/cities",
            get(cities::admin_list_cities).post(cities::create_city),
        )
        .route(
            "/api/v1/admin/cities/{id}",
            put(cities::update_city).delete(cities::delete_city),
        )
        .route(
            "/api/v1/admin/schools",
            get(schools::admin_list_schools).post(schools::create_school),
        )
        .route(
            "/api/v1/admin/schools/{id}",
            put(schools::update_school).delete(schools::delete_school),
        )
        .route(
            "/api/v1/admin/schools/{id}/active",
            post(schools::set_school_active),
        )
        .route(
            "/api/v1/admin/contacts",
            get(contacts::admin_list_contacts),
        )
        .route(
            "/api/v1/admin/contacts/{id}",
            get(contacts::admin_get_contact)
                .put(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        .route(
            "/api/v1/admin/articles",
            get(articles::admin_list_articles).post(articles::create_article),
        )
        .route(
            "/api/v1/admin/articles/{id}",
            put(articles::update_article).delete(articles::delete_article),
        )
        .route(
            "/api/v1/admin/articles/{id}/publish",
            post(articles::set_publish_state),
        )
        .route(
            "/api/v1/admin/maintenance/reconcile-counts",
            post(maintenance::reconcile_counts),
        )
        .route(
            "/api/v1/admin/maintenance/reindex-search",
            post(maintenance::reindex_search),
        )
        .route("/api/v1/admin/media", post(media::upload_image))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

/// Admin auth rides on cookies, so credentialed CORS needs an explicit origin
/// list; without one the API falls back to credential-less wildcard access.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(methods)
            .allow_headers(tower_http::cors::Any)
            .max_age(Duration::from_secs(3600))
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(methods)
            .allow_headers([axum::http::header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(Duration::from_secs(3600))
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
