// storefront_server/src/main.rs

use actix_web::middleware::from_fn;
use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use storefront::db;
use storefront_server::config::AppConfig;
use storefront_server::state::AppState;
use storefront_server::web::{configure_app_routes, persist_session};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // RUST_LOG overrides the INFO default
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting storefront server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  let db_pool = match db::connect(&app_config.database_url, app_config.database_max_connections).await {
    Ok(pool) => pool,
    Err(e) => {
      tracing::error!(error = %e, "Failed to connect to the database.");
      return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }
  };

  if let Err(e) = db::ensure_schema(&db_pool).await {
    tracing::error!(error = %e, "Failed to create the database schema.");
    return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
  }

  if app_config.seed_db {
    match db::seed_catalog(&db_pool).await {
      Ok(inserted) => tracing::info!(inserted, "Catalog seed finished."),
      Err(e) => tracing::error!(error = %e, "Failed to seed the catalog."),
    }
  }

  let app_state = AppState::new(db_pool, app_config.clone());
  tracing::info!("Pipelines registered.");

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(from_fn(persist_session))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
