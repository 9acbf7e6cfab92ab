//! # Postboard Binary
//!
//! The entry point that assembles the application based on compile-time features.

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use configs::Settings;
use pb_api::{configure_routes, middleware, AppState};

// Feature-gated imports: the store backend is picked at compile time
#[cfg(feature = "db-sqlite")]
use pb_db_sqlite::SqlitePostStore;

#[cfg(not(feature = "db-sqlite"))]
compile_error!("postboard needs a store backend; enable the `db-sqlite` feature");

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::load()?;

    // 1. Initialize Database Implementation
    #[cfg(feature = "db-sqlite")]
    let store = SqlitePostStore::connect(&settings.database.url, settings.database.max_connections)
        .await
        .with_context(|| format!("failed to open store at {}", settings.database.url))?;

    // 2. Wrap in AppState (dynamic dispatch keeps handlers backend-agnostic)
    let state = web::Data::new(AppState::new(Box::new(store)));

    let (host, port) = settings.bind_address();
    log::info!("Postboard starting on http://{host}:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::cors_policy())
            .wrap(middleware::normalize_path())
            .wrap(middleware::standard_middleware())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("failed to bind {host}:{port}"))?
    .run()
    .await?;

    Ok(())
}
