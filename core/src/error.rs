// storefront/src/error.rs

//! Error types: `PipelineError` for the workflow engine and `ShopError` for
//! catalog, cart and session operations.

use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("No pipeline registered for context type {type_name}")]
  NotRegistered { type_name: String },

  #[error("Context type mismatch during dispatch (expected {expected_type})")]
  TypeMismatch { expected_type: String },

  #[error("Error in pipeline handler. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },
}

impl From<AnyhowError> for PipelineError {
  fn from(err: AnyhowError) -> Self {
    PipelineError::HandlerError { source: err }
  }
}

/// Errors raised by the storefront data-access layer.
///
/// Form validation failures are not represented here: they are returned as
/// [`FieldErrors`](crate::checkout::FieldErrors) data so the caller can redisplay them.
#[derive(Debug, Error)]
pub enum ShopError {
  /// Unknown product, unknown cart line, or a cart line owned by another session.
  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Store Error: {0}")]
  Store(#[from] sqlx::Error),

  #[error("Session Error: {0}")]
  Session(String),

  #[error("Pipeline Error: {0}")]
  Pipeline(#[from] PipelineError),
}

impl ShopError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, ShopError::NotFound(_))
  }
}

pub type ShopResult<T, E = ShopError> = std::result::Result<T, E>;
