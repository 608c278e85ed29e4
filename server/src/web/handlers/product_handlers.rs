// storefront_server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use storefront::catalog::{self, SortKey};
use storefront::{Notice, NoticeLevel};
use tracing::{info, instrument};

use super::redirect_to;
use crate::errors::AppError;
use crate::state::AppState;
use crate::web::session::BrowserSession;
use crate::web::views::ProductJson;

#[derive(Deserialize, Debug)]
pub struct ListQuery {
  pub sort: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SearchQuery {
  pub q: Option<String>,
}

#[instrument(name = "handler::index", skip(app_state, session))]
pub async fn index_handler(
  app_state: web::Data<AppState>,
  session: BrowserSession,
  query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
  let sort = SortKey::parse(query.sort.as_deref());
  let products = catalog::list_sorted(&app_state.db_pool, sort).await?;

  Ok(HttpResponse::Ok().json(json!({
    "products": ProductJson::list(&products, &app_state.config),
    "current_sort": sort.as_str(),
    "notices": session.take_notices(),
  })))
}

#[instrument(name = "handler::product_detail", skip(app_state, session), fields(product_id = %path))]
pub async fn product_detail_handler(
  app_state: web::Data<AppState>,
  session: BrowserSession,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let product = catalog::get_by_id(&app_state.db_pool, product_id).await?;

  session.resolve();
  let recent_ids = session.record_view(product.id);
  let recently_viewed = catalog::get_many_ordered(&app_state.db_pool, &recent_ids).await?;

  Ok(HttpResponse::Ok().json(json!({
    "product": ProductJson::from_product(&product, &app_state.config),
    "recently_viewed": ProductJson::list(&recently_viewed, &app_state.config),
    "notices": session.take_notices(),
  })))
}

/// Product details for the quick-view popup.
#[instrument(name = "handler::product_details_ajax", skip(app_state), fields(product_id = %path))]
pub async fn product_details_ajax_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product = catalog::get_by_id(&app_state.db_pool, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(ProductJson::from_product(&product, &app_state.config)))
}

#[instrument(name = "handler::search", skip(app_state, session))]
pub async fn search_handler(
  app_state: web::Data<AppState>,
  session: BrowserSession,
  query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
  let term = query.q.as_deref().map(str::trim).unwrap_or_default();
  if term.is_empty() {
    return Ok(redirect_to("/"));
  }

  let products = catalog::search(&app_state.db_pool, term).await?;
  let level = if products.is_empty() {
    NoticeLevel::Warning
  } else {
    NoticeLevel::Info
  };
  info!(%term, matches = products.len(), "Search served.");

  // The count goes straight into this response; queuing it would write a cookie.
  let mut notices = session.take_notices();
  notices.push(Notice {
    level,
    message: format!("{} product(s) found for '{}'.", products.len(), term),
  });

  Ok(HttpResponse::Ok().json(json!({
    "products": ProductJson::list(&products, &app_state.config),
    "search_query": term,
    "current_sort": "search",
    "notices": notices,
  })))
}
