// src/presentation/http/openapi.rs
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::openapi::Components;
use utoipa::{Modify, OpenApi, ToSchema};

use crate::application::commands::maintenance::{ReconcileCountsOutcome, ReindexOutcome};
use crate::application::dto::{
    ArticleDto, CityDto, ContactDto, Page, ProvinceDto, SchoolDto, SitemapDto, SitemapEntry,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::provinces::list_provinces,
        crate::presentation::http::controllers::provinces::get_province_by_slug,
        crate::presentation::http::controllers::provinces::admin_list_provinces,
        crate::presentation::http::controllers::provinces::create_province,
        crate::presentation::http::controllers::provinces::update_province,
        crate::presentation::http::controllers::provinces::delete_province,
        crate::presentation::http::controllers::cities::list_cities,
        crate::presentation::http::controllers::cities::get_city_by_slug,
        crate::presentation::http::controllers::cities::admin_list_cities,
        crate::presentation::http::controllers::cities::create_city,
        crate::presentation::http::controllers::cities::update_city,
        crate::presentation::http::controllers::cities::delete_city,
        crate::presentation::http::controllers::schools::list_schools,
        crate::presentation::http::controllers::schools::get_school_by_slug,
        crate::presentation::http::controllers::schools::related_schools,
        crate::presentation::http::controllers::schools::admin_list_schools,
        crate::presentation::http::controllers::schools::create_school,
        crate::presentation::http::controllers::schools::update_school,
        crate::presentation::http::controllers::schools::set_school_active,
        crate::presentation::http::controllers::schools::delete_school,
        crate::presentation::http::controllers::contacts::submit_contact,
        crate::presentation::http::controllers::contacts::admin_list_contacts,
        crate::presentation::http::controllers::contacts::admin_get_contact,
        crate::presentation::http::controllers::contacts::update_contact,
        crate::presentation::http::controllers::contacts::delete_contact,
        crate::presentation::http::controllers::articles::list_articles,
        crate::presentation::http::controllers::articles::get_article_by_slug,
        crate::presentation::http::controllers::articles::admin_list_articles,
        crate::presentation::http::controllers::articles::create_article,
        crate::presentation::http::controllers::articles::update_article,
        crate::presentation::http::controllers::articles::set_publish_state,
        crate::presentation::http::controllers::articles::delete_article,
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::auth::logout,
        crate::presentation::http::controllers::auth::session,
        crate::presentation::http::controllers::maintenance::reconcile_counts,
        crate::presentation::http::controllers::maintenance::reindex_search,
        crate::presentation::http::controllers::media::upload_image,
        crate::presentation::http::controllers::sitemap::sitemap,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            ProvinceDto,
            CityDto,
            SchoolDto,
            ContactDto,
            ArticleDto,
            SitemapDto,
            SitemapEntry,
            Page<SchoolDto>,
            Page<ContactDto>,
            Page<ArticleDto>,
            ReconcileCountsOutcome,
            ReindexOutcome,
            crate::presentation::http::controllers::provinces::CreateProvinceRequest,
            crate::presentation::http::controllers::provinces::UpdateProvinceRequest,
            crate::presentation::http::controllers::cities::CreateCityRequest,
            crate::presentation::http::controllers::cities::UpdateCityRequest,
            crate::presentation::http::controllers::schools::CreateSchoolRequest,
            crate::presentation::http::controllers::schools::UpdateSchoolRequest,
            crate::presentation::http::controllers::schools::SetActiveRequest,
            crate::presentation::http::controllers::contacts::SubmitContactRequest,
            crate::presentation::http::controllers::contacts::UpdateContactRequest,
            crate::presentation::http::controllers::articles::CreateArticleRequest,
            crate::presentation::http::controllers::articles::UpdateArticleRequest,
            crate::presentation::http::controllers::articles::PublishRequest,
            crate::presentation::http::controllers::auth::LoginRequest,
            crate::presentation::http::controllers::auth::SessionResponse,
            crate::presentation::http::controllers::media::UploadedImageResponse
        )
    ),
    tags(
        (name = "Provinces", description = "Public province directory"),
        (name = "Cities", description = "Public city directory"),
        (name = "Schools", description = "Public school listings"),
        (name = "Contacts", description = "Lead submission"),
        (name = "Articles", description = "Public blog"),
        (name = "Auth", description = "Admin session endpoints"),
        (name = "Admin", description = "Back-office management"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "Autoescuelas API",
        description = "Regional driving-school directory backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        components.add_security_scheme(
            "adminSession",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("admin_session"))),
        );
    }
}

pub fn docs_router() -> Router {
    Router::new().route("/openapi.json", get(serve_openapi))
}

async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
