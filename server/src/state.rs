// storefront_server/src/state.rs
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::pipelines;
use actix_web::cookie::Key;
use sqlx::SqlitePool;
use std::sync::Arc;
use storefront::PipelineRegistry;

#[derive(Clone)]
pub struct AppState {
  pub db_pool: SqlitePool,
  pub pipelines: Arc<PipelineRegistry<AppError>>,
  pub config: Arc<AppConfig>, // Share loaded config
  pub cookie_key: Key,
}

impl AppState {
  /// Builds the shared state and registers every request pipeline.
  pub fn new(db_pool: SqlitePool, config: Arc<AppConfig>) -> Self {
    let cookie_key = Key::derive_from(config.secret_key.as_bytes());
    let pipelines = Arc::new(PipelineRegistry::<AppError>::new());
    pipelines::register_all_pipelines(&pipelines);
    Self {
      db_pool,
      pipelines,
      config,
      cookie_key,
    }
  }
}
