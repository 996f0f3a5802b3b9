use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use autoescuelas_core::application::{
    ports::{media::ImageStore, search::SearchIndexWriter, time::Clock, util::SlugGenerator},
    services::ApplicationServices,
};
use autoescuelas_core::config::AppConfig;
use autoescuelas_core::domain::{
    article::ArticleRepository, city::CityRepository, contact::ContactRepository,
    province::ProvinceRepository, school::SchoolRepository,
};
use autoescuelas_core::infrastructure::{
    database,
    media::{CloudinaryImageStore, DisabledImageStore},
    repositories::{
        PostgresArticleRepository, PostgresCityRepository, PostgresContactRepository,
        PostgresProvinceRepository, PostgresSchoolRepository,
    },
    search::{MeilisearchIndexWriter, NoopSearchIndexWriter},
    security::AdminSessionManager,
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use autoescuelas_core::presentation::http::{routes::build_router, state::HttpState};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let provinces: Arc<dyn ProvinceRepository> =
        Arc::new(PostgresProvinceRepository::new(pool.clone()));
    let cities: Arc<dyn CityRepository> = Arc::new(PostgresCityRepository::new(pool.clone()));
    let schools: Arc<dyn SchoolRepository> = Arc::new(PostgresSchoolRepository::new(pool.clone()));
    let contacts: Arc<dyn ContactRepository> =
        Arc::new(PostgresContactRepository::new(pool.clone()));
    let articles: Arc<dyn ArticleRepository> =
        Arc::new(PostgresArticleRepository::new(pool.clone()));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::default());
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator::default());

    let search: Arc<dyn SearchIndexWriter> = match config.meilisearch() {
        Some(meili) => {
            tracing::info!(url = %meili.url, "search indexing via meilisearch");
            Arc::new(MeilisearchIndexWriter::new(
                meili.url.clone(),
                meili.api_key.clone(),
            ))
        }
        None => Arc::new(NoopSearchIndexWriter),
    };

    let image_store: Arc<dyn ImageStore> = match config.cloudinary() {
        Some(cloudinary) => Arc::new(CloudinaryImageStore::new(
            cloudinary.cloud_name.clone(),
            cloudinary.upload_preset.clone(),
        )),
        None => Arc::new(DisabledImageStore),
    };

    let services = Arc::new(ApplicationServices::new(
        provinces, cities, schools, contacts, articles, clock, slugger, search, image_store,
    ));

    let sessions = Arc::new(AdminSessionManager::new(
        config.session_secret().as_bytes().to_vec(),
        config.admin_username(),
        config.admin_password(),
        config.session_ttl_seconds(),
    ));

    let state = HttpState { services, sessions };
    let app = build_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
