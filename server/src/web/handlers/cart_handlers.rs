// storefront_server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use storefront::cart::{self, AdjustOutcome, Adjustment};
use storefront::models::{cents_to_decimal, round2};
use storefront::{ContextData, NoticeLevel, PipelineResult};
use tracing::{error, info, instrument, warn};

use super::redirect_to;
use crate::errors::AppError;
use crate::pipelines::contexts::AddToCartCtxData;
use crate::state::AppState;
use crate::web::request_kind::{AjaxOnly, RequestKind};
use crate::web::session::BrowserSession;
use crate::web::views::CartItemJson;

#[derive(Deserialize, Debug)]
pub struct UpdateCartItemPayload {
  pub action: String,
}

#[instrument(name = "handler::add_to_cart", skip(app_state, session, _ajax), fields(product_id = %path))]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  session: BrowserSession,
  _ajax: AjaxOnly,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let token = session.resolve();
  let ctx = ContextData::new(AddToCartCtxData::new(
    app_state.db_pool.clone(),
    token,
    path.into_inner(),
  ));

  match app_state.pipelines.run(ctx.clone()).await? {
    PipelineResult::Completed => {}
    PipelineResult::Stopped => {
      error!("Add to cart pipeline stopped unexpectedly.");
      return Err(AppError::Internal("Add to cart did not complete.".to_string()));
    }
  }

  let outcome = ctx
    .read()
    .outcome
    .clone()
    .ok_or_else(|| AppError::Internal("Add to cart pipeline produced no outcome.".to_string()))?;

  Ok(HttpResponse::Ok().json(json!({
    "status": "success",
    "message": outcome.message(),
    "quantity": outcome.quantity,
    "product_name": outcome.product_name,
  })))
}

#[instrument(name = "handler::view_cart", skip(app_state, session))]
pub async fn view_cart_handler(
  app_state: web::Data<AppState>,
  session: BrowserSession,
) -> Result<HttpResponse, AppError> {
  let token = session.resolve();
  let summary = cart::summary(&app_state.db_pool, &token).await?;
  let items: Vec<CartItemJson> = summary
    .lines
    .iter()
    .map(|line| CartItemJson::from_line(line, &app_state.config))
    .collect();

  Ok(HttpResponse::Ok().json(json!({
    "items": items,
    "grand_total": summary.totals.grand_total(),
    "total_carbon_impact": summary.totals.total_carbon_impact(),
    "notices": session.take_notices(),
  })))
}

#[instrument(
  name = "handler::update_cart_item",
  skip(app_state, session, _ajax, payload),
  fields(cart_line_id = %path, action = %payload.action)
)]
pub async fn update_cart_item_handler(
  app_state: web::Data<AppState>,
  session: BrowserSession,
  _ajax: AjaxOnly,
  path: web::Path<i64>,
  payload: web::Json<UpdateCartItemPayload>,
) -> Result<HttpResponse, AppError> {
  let adjustment = match payload.action.as_str() {
    "increase" => Adjustment::Increase,
    "decrease" => Adjustment::Decrease,
    other => {
      warn!(action = %other, "Unknown cart update action.");
      return Err(AppError::Validation("Invalid action.".to_string()));
    }
  };

  let token = session.resolve();
  let outcome = cart::adjust(&app_state.db_pool, &token, path.into_inner(), adjustment)
    .await
    .map_err(|e| match e {
      e if e.is_not_found() => AppError::NotFound("Item not found.".to_string()),
      e => AppError::from(e),
    })?;

  let body = match outcome {
    AdjustOutcome::Updated {
      new_quantity,
      item_total_cents,
    } => json!({
      "status": "success",
      "new_quantity": new_quantity,
      "item_total_price": round2(cents_to_decimal(item_total_cents)),
      "message": "Cart updated.",
    }),
    AdjustOutcome::Removed => json!({
      "status": "removed",
      "message": "Item removed.",
    }),
  };
  Ok(HttpResponse::Ok().json(body))
}

/// Serves both the AJAX remove button and the plain form fallback. The form variant
/// reports through a notice and redirects back to the cart.
#[instrument(name = "handler::remove_from_cart", skip(app_state, session), fields(cart_line_id = %path))]
pub async fn remove_from_cart_handler(
  app_state: web::Data<AppState>,
  session: BrowserSession,
  kind: RequestKind,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let token = session.resolve();
  let result = cart::remove(&app_state.db_pool, &token, path.into_inner()).await;

  match (kind, result) {
    (RequestKind::Ajax, Ok(removed)) => Ok(HttpResponse::Ok().json(json!({
      "status": "success",
      "message": format!("'{}' removed.", removed.product_name),
    }))),
    (RequestKind::Ajax, Err(e)) if e.is_not_found() => Err(AppError::NotFound("Item not found.".to_string())),
    (RequestKind::Ajax, Err(e)) => Err(e.into()),
    (RequestKind::Form, result) => {
      match result {
        Ok(removed) => {
          info!(product_name = %removed.product_name, "Cart line removed via form.");
          session.notify(NoticeLevel::Success, format!("'{}' removed.", removed.product_name));
        }
        Err(e) if e.is_not_found() => session.notify(NoticeLevel::Warning, "Item not found in cart."),
        Err(e) => {
          error!(error = %e, "Failed to remove cart line.");
          session.notify(NoticeLevel::Error, "Error removing item.");
        }
      }
      Ok(redirect_to("/cart"))
    }
  }
}
