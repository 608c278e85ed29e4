// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use once_cell::sync::Lazy;
use sqlx::SqlitePool;
use std::path::PathBuf;
use storefront::models::{NewProduct, Product};
use storefront::{catalog, db, ContextData, PipelineControl, PipelineError, SessionToken};
use tracing::Level;
use uuid::Uuid;

// --- Pipeline fixtures ---

#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Pipeline engine error: {0}")]
  Engine(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<PipelineError> for TestError {
  fn from(err: PipelineError) -> Self {
    TestError::Engine(format!("{:?}", err))
  }
}

pub fn create_simple_handler(
  step_name: &'static str,
  message_to_append: &'static str,
) -> storefront::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name.to_string());
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> storefront::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name.to_string());
      Err(TestError::Handler(error_message.to_string()))
    })
  })
}

// --- Store fixtures ---

/// Fresh in-memory store holding the four sample sneakers.
pub async fn seeded_store() -> SqlitePool {
  let pool = db::connect_in_memory().await.expect("in-memory store");
  db::seed_catalog(&pool).await.expect("seed catalog");
  pool
}

pub async fn empty_store() -> SqlitePool {
  db::connect_in_memory().await.expect("in-memory store")
}

/// Seeded store in a temporary database file, removed again on drop.
///
/// Unlike the in-memory store this pool has several connections, so concurrent calls
/// really do contend for SQLite's locks.
pub struct FileStore {
  pub pool: SqlitePool,
  path: PathBuf,
}

impl FileStore {
  pub async fn seeded(max_connections: u32) -> Self {
    let path = std::env::temp_dir().join(format!("storefront-test-{}.db", Uuid::new_v4()));
    let pool = db::connect(&format!("sqlite://{}", path.display()), max_connections)
      .await
      .expect("file store");
    db::ensure_schema(&pool).await.expect("schema");
    db::seed_catalog(&pool).await.expect("seed catalog");
    FileStore { pool, path }
  }
}

impl Drop for FileStore {
  fn drop(&mut self) {
    let base = self.path.display().to_string();
    for suffix in ["", "-journal", "-wal", "-shm"] {
      let _ = std::fs::remove_file(format!("{}{}", base, suffix));
    }
  }
}

pub async fn insert(pool: &SqlitePool, product: NewProduct) -> Product {
  catalog::insert_product(pool, &product).await.expect("insert product")
}

pub async fn product_named(pool: &SqlitePool, name: &str) -> Product {
  catalog::find_by_name(pool, name)
    .await
    .expect("lookup by name")
    .unwrap_or_else(|| panic!("product '{}' missing from fixture", name))
}

pub fn session(label: &str) -> SessionToken {
  SessionToken::from(format!("test-session-{}", label).as_str())
}

// --- Tracing ---

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
