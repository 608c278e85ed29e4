// storefront_server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use storefront::{PipelineError, ShopError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  /// The endpoint only serves a particular kind of request (e.g. AJAX).
  #[error("Invalid Request Type: {0}")]
  RequestType(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Store Error: {0}")]
  Store(#[from] sqlx::Error),

  #[error("Pipeline Error: {source}")]
  Pipeline {
    #[from]
    source: PipelineError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<ShopError> for AppError {
  fn from(err: ShopError) -> Self {
    match err {
      ShopError::NotFound(m) => AppError::NotFound(m),
      ShopError::Store(e) => AppError::Store(e),
      ShopError::Pipeline(source) => AppError::Pipeline { source },
      ShopError::Session(m) => AppError::Internal(m),
    }
  }
}

// Handlers that reach for anyhow get folded into Internal; a wrapped sqlx error keeps its variant.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<sqlx::Error>() {
      Ok(sqlx_err) => AppError::Store(sqlx_err),
      Err(err) => AppError::Internal(err.to_string()),
    }
  }
}

impl AppError {
  /// Message safe to show the client. Server-side failures never leak their cause.
  pub fn public_message(&self) -> String {
    match self {
      AppError::Validation(m) | AppError::NotFound(m) | AppError::RequestType(m) => m.clone(),
      AppError::Config(_) | AppError::Store(_) | AppError::Pipeline { .. } | AppError::Internal(_) => {
        "An internal error occurred.".to_string()
      }
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::RequestType(_) => StatusCode::FORBIDDEN,
      AppError::Config(_) | AppError::Store(_) | AppError::Pipeline { .. } | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Responding with client error");
    }
    HttpResponse::build(status).json(json!({"status": "error", "message": self.public_message()}))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
