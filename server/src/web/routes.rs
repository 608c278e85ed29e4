// storefront_server/src/web/routes.rs

use actix_web::{error, web, HttpRequest, HttpResponse};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::{cart_handlers, checkout_handlers, product_handlers};

async fn health_check_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  storefront::db::ping(&app_state.db_pool).await?;
  Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

async fn not_found_handler(req: HttpRequest) -> Result<HttpResponse, AppError> {
  warn!(path = %req.path(), "No route matched.");
  Err(AppError::NotFound("Page not found.".to_string()))
}

/// Extractor failures get the same `{status, message}` body as handler errors.
fn extractor_configs(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(|err, _req| {
      warn!(error = %err, "Rejected malformed JSON body.");
      error::Error::from(AppError::Validation("Malformed request body.".to_string()))
    }))
    .app_data(web::FormConfig::default().error_handler(|err, _req| {
      warn!(error = %err, "Rejected malformed form body.");
      error::Error::from(AppError::Validation("Malformed form data.".to_string()))
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
      warn!(error = %err, "Rejected malformed query string.");
      error::Error::from(AppError::Validation("Malformed query string.".to_string()))
    }))
    // A non-numeric id cannot name anything, so it is a 404 like an unknown id.
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
      warn!(error = %err, "Rejected unparsable path parameter.");
      error::Error::from(AppError::NotFound("Page not found.".to_string()))
    }));
}

/// Called from `main.rs` (and the HTTP tests) to mount every route.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  extractor_configs(cfg);

  cfg
    .route("/health", web::get().to(health_check_handler))
    // Catalog
    .route("/", web::get().to(product_handlers::index_handler))
    .route("/search", web::get().to(product_handlers::search_handler))
    .route("/product/{id}", web::get().to(product_handlers::product_detail_handler))
    .route(
      "/product/{id}/details_ajax",
      web::get().to(product_handlers::product_details_ajax_handler),
    )
    // Cart
    .route("/cart", web::get().to(cart_handlers::view_cart_handler))
    .route(
      "/add_to_cart/{product_id}",
      web::post().to(cart_handlers::add_to_cart_handler),
    )
    .route(
      "/update_cart_item/{cart_line_id}",
      web::post().to(cart_handlers::update_cart_item_handler),
    )
    .route(
      "/remove_from_cart/{cart_line_id}",
      web::post().to(cart_handlers::remove_from_cart_handler),
    )
    // Checkout
    .service(
      web::resource("/checkout")
        .route(web::get().to(checkout_handlers::checkout_page_handler))
        .route(web::post().to(checkout_handlers::checkout_submit_handler)),
    )
    .default_service(web::to(not_found_handler));
}
