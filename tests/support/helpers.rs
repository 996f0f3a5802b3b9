// tests/support/helpers.rs
use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::util::ServiceExt;

use autoescuelas_core::application::ports::{Clock, SearchIndexWriter};
use autoescuelas_core::application::services::ApplicationServices;
use autoescuelas_core::infrastructure::security::AdminSessionManager;
use autoescuelas_core::infrastructure::util::DefaultSlugGenerator;
use autoescuelas_core::presentation::http::routes::build_router;
use autoescuelas_core::presentation::http::state::HttpState;

use super::mocks::{
    CapturingSearchWriter, FixedClock, MemArticleRepo, MemCityRepo, MemContactRepo,
    MemProvinceRepo, MemSchoolRepo, MemStore, StubImageStore,
};

pub const TEST_ADMIN_USER: &str = "admin";
pub const TEST_ADMIN_PASS: &str = "correct-horse-battery-staple";
const TEST_SESSION_SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";
const TEST_SESSION_TTL: i64 = 3600;

/// In-memory application wired exactly like the production bootstrap, with
/// handles onto the backing store and collaborators kept for assertions.
pub struct TestApp {
    pub store: Arc<MemStore>,
    pub clock: Arc<FixedClock>,
    pub search: Arc<CapturingSearchWriter>,
    pub services: Arc<ApplicationServices>,
}

pub fn build_services() -> TestApp {
    let store = Arc::new(MemStore::default());
    let clock = Arc::new(FixedClock::new());
    let search = Arc::new(CapturingSearchWriter::default());

    let services = Arc::new(ApplicationServices::new(
        Arc::new(MemProvinceRepo(Arc::clone(&store))),
        Arc::new(MemCityRepo(Arc::clone(&store))),
        Arc::new(MemSchoolRepo(Arc::clone(&store))),
        Arc::new(MemContactRepo(Arc::clone(&store))),
        Arc::new(MemArticleRepo(Arc::clone(&store))),
        Arc::clone(&clock) as Arc<dyn Clock>,
        Arc::new(DefaultSlugGenerator::default()),
        Arc::clone(&search) as Arc<dyn SearchIndexWriter>,
        Arc::new(StubImageStore),
    ));

    TestApp {
        store,
        clock,
        search,
        services,
    }
}

pub fn router_for(app: &TestApp) -> Router {
    let sessions = Arc::new(AdminSessionManager::new(
        TEST_SESSION_SECRET.to_vec(),
        TEST_ADMIN_USER,
        TEST_ADMIN_PASS,
        TEST_SESSION_TTL,
    ));
    let state = HttpState {
        services: Arc::clone(&app.services),
        sessions,
    };
    build_router(state, &[])
}

pub fn make_test_router() -> Router {
    router_for(&build_services())
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn json_request(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

pub fn authed_request(method: &str, uri: &str, cookie: &str, payload: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, cookie);
    let body = match payload {
        Some(payload) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(payload.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("request")
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Logs the test admin in and returns the `Cookie` header value that grants
/// access to the admin surface.
pub async fn login(router: &Router) -> String {
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/admin/login",
            serde_json::json!({
                "username": TEST_ADMIN_USER,
                "password": TEST_ADMIN_PASS,
            }),
        ))
        .await
        .expect("login request");
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie issued")
        .to_str()
        .expect("ascii cookie");
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}
