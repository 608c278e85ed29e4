// storefront_server/src/pipelines/contexts.rs

//! Data carried through each pipeline. Handlers receive these wrapped in
//! `storefront::ContextData`.

use sqlx::SqlitePool;
use storefront::cart::AddOutcome;
use storefront::checkout::{FieldErrors, PaymentForm};
use storefront::models::{CartTotals, Product};
use storefront::SessionToken;

#[derive(Clone)]
pub struct AddToCartCtxData {
  pub db_pool: SqlitePool,
  pub session: SessionToken,
  pub product_id: i64,
  pub product: Option<Product>,
  pub outcome: Option<AddOutcome>,
}

impl AddToCartCtxData {
  pub fn new(db_pool: SqlitePool, session: SessionToken, product_id: i64) -> Self {
    Self {
      db_pool,
      session,
      product_id,
      product: None,
      outcome: None,
    }
  }
}

#[derive(Clone)]
pub struct CheckoutCtxData {
  pub db_pool: SqlitePool,
  pub session: SessionToken,
  pub form: PaymentForm,
  /// Filled by `validate_payment_form`; non-empty means the run stopped there.
  pub errors: FieldErrors,
  /// Totals of the cart that was checked out, computed right before clearing it.
  pub final_totals: Option<CartTotals>,
  pub cleared_lines: u64,
}

impl CheckoutCtxData {
  pub fn new(db_pool: SqlitePool, session: SessionToken, form: PaymentForm) -> Self {
    Self {
      db_pool,
      session,
      form,
      errors: FieldErrors::new(),
      final_totals: None,
      cleared_lines: 0,
    }
  }
}
