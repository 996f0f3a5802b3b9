// src/infrastructure/database.rs
use sqlx::{postgres::PgPoolOptions, PgPool};

/// Single process-wide pool, created once at startup and shared by every
/// repository.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(16)
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
