// storefront_server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

/// Development-only signing key. Sessions signed with it are forgeable by anyone
/// who has read this file.
const DEV_SECRET_KEY: &str = "storefront-development-secret-key-change-me-before-deploying";

/// Minimum master key length accepted by `cookie::Key::derive_from`.
pub const MIN_SECRET_KEY_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub database_max_connections: u32,

  // Master key for the signed session cookie
  pub secret_key: String,
  pub session_ttl_hours: i64,

  // Prepended to product image file names in JSON responses
  pub image_url_prefix: String,

  pub seed_db: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| env::var(var_name).ok().filter(|v| !v.trim().is_empty());

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL").unwrap_or_else(|| "sqlite://shop.db".to_string());
    let database_max_connections = get_env("DATABASE_MAX_CONNECTIONS")
      .unwrap_or_else(|| "5".to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e)))?;

    let secret_key = match get_env("SECRET_KEY") {
      Some(key) => key,
      None => {
        tracing::warn!("SECRET_KEY not set, using the built-in development key.");
        DEV_SECRET_KEY.to_string()
      }
    };
    if secret_key.len() < MIN_SECRET_KEY_BYTES {
      return Err(AppError::Config(format!(
        "SECRET_KEY must be at least {} bytes long.",
        MIN_SECRET_KEY_BYTES
      )));
    }

    let session_ttl_hours = get_env("SESSION_TTL_HOURS")
      .unwrap_or_else(|| "24".to_string())
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid SESSION_TTL_HOURS: {}", e)))?;
    let image_url_prefix = get_env("IMAGE_URL_PREFIX")
      .unwrap_or_else(|| "/static/images".to_string())
      .trim_end_matches('/')
      .to_string();

    let seed_db = get_env("SEED_DB")
      .unwrap_or_else(|| "true".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      secret_key,
      session_ttl_hours,
      image_url_prefix,
      seed_db,
    })
  }

  /// Defaults suitable for tests: in-memory database, development key, no seeding.
  pub fn for_tests() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 0,
      database_url: "sqlite::memory:".to_string(),
      database_max_connections: 1,
      secret_key: DEV_SECRET_KEY.to_string(),
      session_ttl_hours: 24,
      image_url_prefix: "/static/images".to_string(),
      seed_db: false,
    }
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }

  /// Resolves a stored image file name to the URL the browser should load.
  pub fn image_url(&self, image: Option<&str>) -> Option<String> {
    image.map(|file| format!("{}/{}", self.image_url_prefix, file))
  }
}
