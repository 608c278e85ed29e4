// storefront_server/src/pipelines/mod.rs

//! Defines and registers the request pipelines of the storefront.

use crate::errors::AppError;
use storefront::PipelineRegistry;

pub mod contexts;

pub mod cart_pipeline;
pub mod checkout_pipeline;

/// Registers every pipeline with the registry held in `AppState`.
///
/// Called once while building the application state.
pub fn register_all_pipelines(registry: &PipelineRegistry<AppError>) {
  tracing::info!("Registering pipelines...");

  cart_pipeline::register_add_to_cart_pipeline(registry);
  checkout_pipeline::register_checkout_pipeline(registry);

  tracing::info!("All application pipelines registered.");
}
