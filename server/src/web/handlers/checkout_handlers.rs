// storefront_server/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use storefront::cart;
use storefront::checkout::{FieldErrors, PaymentForm};
use storefront::{ContextData, NoticeLevel, PipelineResult};
use tracing::{info, instrument, warn};

use super::redirect_to;
use crate::errors::AppError;
use crate::pipelines::contexts::CheckoutCtxData;
use crate::state::AppState;
use crate::web::session::BrowserSession;

#[instrument(name = "handler::checkout_page", skip(app_state, session))]
pub async fn checkout_page_handler(
  app_state: web::Data<AppState>,
  session: BrowserSession,
) -> Result<HttpResponse, AppError> {
  let token = session.resolve();
  let summary = cart::summary(&app_state.db_pool, &token).await?;
  if summary.is_empty() {
    session.notify(NoticeLevel::Warning, "Cart is empty.");
    return Ok(redirect_to("/cart"));
  }

  Ok(HttpResponse::Ok().json(json!({
    "grand_total": summary.totals.grand_total(),
    "total_carbon_impact": summary.totals.total_carbon_impact(),
    "errors": FieldErrors::new(),
    "form": {},
    "notices": session.take_notices(),
  })))
}

#[instrument(name = "handler::checkout_submit", skip(app_state, session, form))]
pub async fn checkout_submit_handler(
  app_state: web::Data<AppState>,
  session: BrowserSession,
  form: web::Form<PaymentForm>,
) -> Result<HttpResponse, AppError> {
  let token = session.resolve();
  let summary = cart::summary(&app_state.db_pool, &token).await?;
  if summary.is_empty() {
    session.notify(NoticeLevel::Warning, "Cart is empty.");
    return Ok(redirect_to("/cart"));
  }

  let form = form.into_inner();
  let ctx = ContextData::new(CheckoutCtxData::new(app_state.db_pool.clone(), token, form));
  let result = app_state.pipelines.run(ctx.clone()).await?;

  let (errors, entered, final_totals) = {
    let guard = ctx.read();
    (guard.errors.clone(), guard.form.for_redisplay(), guard.final_totals)
  };

  match result {
    PipelineResult::Stopped => {
      warn!(error_count = errors.len(), "Checkout rejected, payment form invalid.");
      session.notify(NoticeLevel::Error, "Correct form errors.");
      Ok(HttpResponse::Ok().json(json!({
        "status": "error",
        "errors": errors,
        "form": entered,
        "grand_total": summary.totals.grand_total(),
        "total_carbon_impact": summary.totals.total_carbon_impact(),
        "notices": session.take_notices(),
      })))
    }
    PipelineResult::Completed => {
      let totals = final_totals.unwrap_or(summary.totals);
      info!(grand_total = totals.grand_total(), "Checkout completed.");
      session.notify(NoticeLevel::Success, "Checkout successful!");
      Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "grand_total": totals.grand_total(),
        "total_carbon_impact": totals.total_carbon_impact(),
        "notices": session.take_notices(),
      })))
    }
  }
}
