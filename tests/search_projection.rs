// tests/search_projection.rs
mod support;

use std::sync::atomic::Ordering;

use autoescuelas_core::application::commands::{
    CreateCityCommand, CreateProvinceCommand, CreateSchoolCommand, SchoolLocation,
};
use autoescuelas_core::application::dto::SearchProjection;
use autoescuelas_core::application::ports::SearchIndexWriter;
use autoescuelas_core::infrastructure::search::NoopSearchIndexWriter;

use support::{build_services, TestApp};

async fn seed_directory(app: &TestApp) {
    let cordoba = app
        .services
        .province_commands
        .create(CreateProvinceCommand {
            name: "Córdoba".into(),
            description: None,
            image_url: None,
            is_active: true,
            sort_order: 0,
        })
        .await
        .unwrap();
    app.services
        .province_commands
        .create(CreateProvinceCommand {
            name: "Tierra del Fuego".into(),
            description: None,
            image_url: None,
            is_active: false,
            sort_order: 0,
        })
        .await
        .unwrap();

    let city = app
        .services
        .city_commands
        .create(CreateCityCommand {
            province_id: cordoba.id,
            name: "Río Cuarto".into(),
            is_active: true,
            sort_order: 0,
        })
        .await
        .unwrap();

    let school = |name: &str, active: bool| CreateSchoolCommand {
        name: name.into(),
        location: SchoolLocation::CityId(city.id),
        price_min: None,
        price_max: None,
        phone: None,
        email: None,
        website: None,
        address: None,
        services: vec!["auto".into()],
        is_active: active,
        is_verified: true,
        is_featured: false,
        sort_order: 0,
    };
    app.services
        .school_commands
        .create(school("Manejo Seguro", true))
        .await
        .unwrap();
    app.services
        .school_commands
        .create(school("Todavía en Alta", false))
        .await
        .unwrap();
}

#[tokio::test]
async fn projection_flattens_the_active_directory() {
    let app = build_services();
    seed_directory(&app).await;

    let projection = app.services.maintenance.project_for_search().await.unwrap();

    assert_eq!(projection.schools.len(), 1);
    let doc = &projection.schools[0];
    assert_eq!(doc.name, "Manejo Seguro");
    assert_eq!(doc.slug, "manejo-seguro");
    assert_eq!(doc.city, "Río Cuarto");
    assert_eq!(doc.province, "Córdoba");
    assert!(doc.is_verified);

    // Inactive provinces are not projected.
    assert_eq!(projection.provinces.len(), 1);
    assert_eq!(projection.provinces[0].slug, "cordoba");

    assert_eq!(projection.cities.len(), 1);
    assert_eq!(projection.cities[0].province, "Córdoba");
    assert_eq!(projection.cities[0].schools_count, 1);
}

#[tokio::test]
async fn reindex_hands_the_projection_to_the_writer() {
    let app = build_services();
    seed_directory(&app).await;

    let outcome = app.services.maintenance.reindex_search().await.unwrap();
    assert!(outcome.indexed);
    assert_eq!(outcome.schools, 1);
    assert_eq!(outcome.provinces, 1);
    assert_eq!(outcome.cities, 1);

    let recorded = app.search.projections.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].schools[0].slug, "manejo-seguro");
}

#[tokio::test]
async fn failing_search_writer_does_not_fail_the_admin_action() {
    let app = build_services();
    seed_directory(&app).await;
    app.search.fail.store(true, Ordering::SeqCst);

    let outcome = app.services.maintenance.reindex_search().await.unwrap();
    assert!(!outcome.indexed);
    assert_eq!(outcome.schools, 1);
    assert!(app.search.projections.lock().unwrap().is_empty());
}

#[tokio::test]
async fn noop_writer_accepts_any_projection() {
    let writer = NoopSearchIndexWriter;
    let empty = SearchProjection {
        schools: vec![],
        provinces: vec![],
        cities: vec![],
    };
    writer.replace_all(&empty).await.unwrap();
}
