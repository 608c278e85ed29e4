// storefront_server/src/pipelines/checkout_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::CheckoutCtxData;
use storefront::checkout::validate_payment_form;
use storefront::{cart, ContextData, Pipeline, PipelineControl, PipelineRegistry};
use tracing::{info, warn};

pub fn register_checkout_pipeline(registry: &PipelineRegistry<AppError>) {
  let mut p = Pipeline::<CheckoutCtxData, AppError>::new(&[
    ("validate_payment_form", false, None),
    ("tally_cart", false, None),
    ("clear_cart", false, None),
  ]);

  // Step 1: Shape-check the payment form. Field errors are data, not a failure:
  // they are recorded in the context and the run stops with the cart untouched.
  p.on_root("validate_payment_form", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let errors = validate_payment_form(&ctx_data.read().form);
      if errors.is_empty() {
        info!("Checkout Pipeline: payment form accepted.");
        return Ok::<_, AppError>(PipelineControl::Continue);
      }

      let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
      warn!(?fields, "Checkout Pipeline: payment form rejected.");
      ctx_data.write().errors = errors;
      Ok(PipelineControl::Stop)
    })
  });

  // Step 2: Final totals, read from the same line views the cart page shows.
  p.on_root("tally_cart", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let (session, db_pool) = {
        let guard = ctx_data.read();
        (guard.session.clone(), guard.db_pool.clone())
      };

      let totals = cart::totals(&db_pool, &session).await?;
      info!(
        grand_total = totals.grand_total(),
        carbon_impact = totals.total_carbon_impact(),
        "Checkout Pipeline: cart tallied."
      );
      ctx_data.write().final_totals = Some(totals);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  // Step 3: Mock payment succeeded; empty the cart in one transaction.
  p.on_root("clear_cart", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let (session, db_pool) = {
        let guard = ctx_data.read();
        (guard.session.clone(), guard.db_pool.clone())
      };

      let cleared = cart::clear(&db_pool, &session).await?;
      info!(cleared_lines = cleared, "Checkout Pipeline: cart cleared.");
      ctx_data.write().cleared_lines = cleared;
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  registry.register_pipeline(p);
}

#[cfg(test)]
mod tests {
  use super::*;
  use storefront::checkout::PaymentForm;
  use storefront::{catalog, db, PipelineResult, SessionToken};

  fn form(card_number: &str, card_name: &str) -> PaymentForm {
    PaymentForm {
      card_number: card_number.to_string(),
      card_name: card_name.to_string(),
      expiry: "01/30".to_string(),
      cvv: "999".to_string(),
    }
  }

  async fn store_with_cart(session: &SessionToken) -> sqlx::SqlitePool {
    let pool = db::connect_in_memory().await.unwrap();
    db::seed_catalog(&pool).await.unwrap();
    let product = catalog::find_by_name(&pool, "Air Jordan 1 Retro High OG").await.unwrap().unwrap();
    cart::add(&pool, session, product.id).await.unwrap();
    cart::add(&pool, session, product.id).await.unwrap();
    pool
  }

  #[tokio::test]
  async fn invalid_form_stops_before_touching_cart() {
    let session = SessionToken::from("checkout-invalid");
    let pool = store_with_cart(&session).await;
    let registry = PipelineRegistry::<AppError>::new();
    register_checkout_pipeline(&registry);

    let ctx = ContextData::new(CheckoutCtxData::new(pool.clone(), session.clone(), form("1234", "")));
    let result = registry.run(ctx.clone()).await.unwrap();

    assert_eq!(result, PipelineResult::Stopped);
    let guard = ctx.read();
    assert_eq!(guard.errors.len(), 2);
    assert!(guard.errors.contains_key("card_number"));
    assert!(guard.errors.contains_key("card_name"));
    assert!(guard.final_totals.is_none());
    drop(guard);
    assert_eq!(cart::line_rows(&pool, &session).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn valid_form_tallies_then_clears() {
    let session = SessionToken::from("checkout-valid");
    let pool = store_with_cart(&session).await;
    let registry = PipelineRegistry::<AppError>::new();
    register_checkout_pipeline(&registry);

    let ctx = ContextData::new(CheckoutCtxData::new(
      pool.clone(),
      session.clone(),
      form("4111 1111-1111 1111", "Ada Lovelace"),
    ));
    let result = registry.run(ctx.clone()).await.unwrap();

    assert_eq!(result, PipelineResult::Completed);
    let (totals, cleared) = {
      let guard = ctx.read();
      (guard.final_totals, guard.cleared_lines)
    };
    assert_eq!(totals.map(|t| t.grand_total()), Some(360.0));
    assert_eq!(totals.map(|t| t.total_carbon_impact()), Some(25.0));
    assert_eq!(cleared, 1);
    assert!(cart::lines(&pool, &session).await.unwrap().is_empty());
  }
}
