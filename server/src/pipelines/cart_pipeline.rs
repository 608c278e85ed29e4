// storefront_server/src/pipelines/cart_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::AddToCartCtxData;
use storefront::{cart, catalog, ContextData, Pipeline, PipelineControl, PipelineRegistry};
use tracing::{info, warn};

pub fn register_add_to_cart_pipeline(registry: &PipelineRegistry<AppError>) {
  let mut p = Pipeline::<AddToCartCtxData, AppError>::new(&[
    ("load_product", false, None),
    ("upsert_cart_line", false, None),
  ]);

  // Step 1: Resolve the product; unknown ids end the run with NotFound.
  p.on_root("load_product", |ctx_data: ContextData<AddToCartCtxData>| {
    Box::pin(async move {
      let (product_id, db_pool) = {
        let guard = ctx_data.read();
        (guard.product_id, guard.db_pool.clone())
      };

      let product = catalog::get_by_id(&db_pool, product_id).await?;
      info!(product_id, product_name = %product.name, "Add to Cart Pipeline: product resolved.");
      ctx_data.write().product = Some(product);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  // Step 2: Insert the line or bump its quantity, in one statement.
  p.on_root("upsert_cart_line", |ctx_data: ContextData<AddToCartCtxData>| {
    Box::pin(async move {
      let (session, product, db_pool) = {
        let guard = ctx_data.read();
        (guard.session.clone(), guard.product.clone(), guard.db_pool.clone())
      };
      let Some(product) = product else {
        warn!("Add to Cart Pipeline: no product in context, load_product did not run.");
        return Err(AppError::Internal("Product was not loaded before upsert.".to_string()));
      };

      let outcome = cart::add_product(&db_pool, &session, &product).await?;
      info!(
        cart_item_id = outcome.cart_item_id,
        quantity = outcome.quantity,
        "Add to Cart Pipeline: cart line stored."
      );
      ctx_data.write().outcome = Some(outcome);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  registry.register_pipeline(p);
}
