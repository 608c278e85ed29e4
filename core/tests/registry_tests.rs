// tests/registry_tests.rs
mod common;

use common::*;
use storefront::{ContextData, Pipeline, PipelineControl, PipelineError, PipelineRegistry, PipelineResult};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct AlphaContext {
  val: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct BetaContext {
  num: i32,
}

fn registry_with_alpha_and_beta() -> PipelineRegistry<TestError> {
  let registry = PipelineRegistry::<TestError>::new();

  let mut p_alpha = Pipeline::<AlphaContext, TestError>::new(&[("alpha_task", false, None)]);
  p_alpha.on_root("alpha_task", |ctx: ContextData<AlphaContext>| {
    Box::pin(async move {
      ctx.write().val = "alpha_processed".to_string();
      Ok::<PipelineControl, PipelineError>(PipelineControl::Continue)
    })
  });
  registry.register_pipeline(p_alpha);

  let mut p_beta = Pipeline::<BetaContext, TestError>::new(&[("beta_task", false, None)]);
  p_beta.on_root("beta_task", |ctx: ContextData<BetaContext>| {
    Box::pin(async move {
      ctx.write().num = 100;
      Ok::<PipelineControl, TestError>(PipelineControl::Stop)
    })
  });
  registry.register_pipeline(p_beta);

  registry
}

#[tokio::test]
async fn test_registry_dispatches_on_context_type() {
  setup_tracing();
  let registry = registry_with_alpha_and_beta();

  let ctx_alpha = ContextData::new(AlphaContext::default());
  assert_eq!(registry.run(ctx_alpha.clone()).await, Ok(PipelineResult::Completed));
  assert_eq!(ctx_alpha.read().val, "alpha_processed");

  let ctx_beta = ContextData::new(BetaContext::default());
  assert_eq!(registry.run(ctx_beta.clone()).await, Ok(PipelineResult::Stopped));
  assert_eq!(ctx_beta.read().num, 100);
}

#[tokio::test]
async fn test_registry_pipeline_not_registered() {
  setup_tracing();
  let registry = PipelineRegistry::<TestError>::new();
  assert!(!registry.is_registered::<AlphaContext>());

  let result = registry.run(ContextData::new(AlphaContext::default())).await;
  match result {
    Err(TestError::Engine(msg)) => assert!(msg.contains("NotRegistered"), "unexpected message: {}", msg),
    other => panic!("expected NotRegistered, got {:?}", other),
  }
}

#[tokio::test]
async fn test_registering_again_replaces_pipeline() {
  setup_tracing();
  let registry = registry_with_alpha_and_beta();
  assert!(registry.is_registered::<AlphaContext>());

  let mut replacement = Pipeline::<AlphaContext, TestError>::new(&[("replacement", false, None)]);
  replacement.on_root("replacement", |ctx: ContextData<AlphaContext>| {
    Box::pin(async move {
      ctx.write().val = "replaced".to_string();
      Ok::<PipelineControl, TestError>(PipelineControl::Continue)
    })
  });
  registry.register_pipeline(replacement);

  let ctx = ContextData::new(AlphaContext::default());
  registry.run(ctx.clone()).await.unwrap();
  assert_eq!(ctx.read().val, "replaced");
}
