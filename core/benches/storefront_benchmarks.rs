use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use storefront::checkout::{validate_payment_form, PaymentForm};
use storefront::{ContextData, Pipeline, PipelineControl, PipelineError, SkipCondition};
use tokio::runtime::Runtime;

#[derive(Clone, Debug, Default)]
struct BenchContext {
  counter: u64,
  skip_odd: bool,
}

fn bench_payment_validation(c: &mut Criterion) {
  let mut group = c.benchmark_group("PaymentValidation");

  let valid = PaymentForm {
    card_number: "4111 1111-1111 1111".to_string(),
    card_name: "Ada Lovelace".to_string(),
    expiry: "12/29".to_string(),
    cvv: "123".to_string(),
  };
  let empty = PaymentForm::default();

  group.bench_function("valid_form", |b| b.iter(|| validate_payment_form(black_box(&valid))));
  group.bench_function("empty_form", |b| b.iter(|| validate_payment_form(black_box(&empty))));
  group.finish();
}

fn build_pipeline(num_steps: usize) -> Pipeline<BenchContext, PipelineError> {
  // Pipeline::new takes &str; leaked names live for the whole benchmark run.
  let names: Vec<&'static str> = (0..num_steps)
    .map(|i| &*Box::leak(format!("step_{}", i).into_boxed_str()))
    .collect();

  let skip_odd: SkipCondition<BenchContext> = Arc::new(|data: &BenchContext| data.skip_odd);
  let defs: Vec<(&str, bool, Option<SkipCondition<BenchContext>>)> = names
    .iter()
    .enumerate()
    .map(|(i, name)| (*name, false, if i % 2 == 1 { Some(skip_odd.clone()) } else { None }))
    .collect();

  let mut pipeline = Pipeline::new(&defs);
  for name in &names {
    pipeline.on_root(name, |ctx: ContextData<BenchContext>| {
      Box::pin(async move {
        ctx.write().counter += 1;
        Ok::<_, PipelineError>(PipelineControl::Continue)
      })
    });
  }
  pipeline
}

fn bench_pipeline_run(c: &mut Criterion) {
  let mut group = c.benchmark_group("PipelineRun");
  let rt = Runtime::new().unwrap();

  for num_steps in [1usize, 5, 10] {
    let pipeline = build_pipeline(num_steps);
    let pipeline = &pipeline;
    for skip_odd in [false, true] {
      let id = BenchmarkId::new(if skip_odd { "skip_odd" } else { "all_steps" }, num_steps);
      group.bench_with_input(id, &num_steps, |b, _| {
        b.to_async(&rt).iter(|| async move {
          let ctx = ContextData::new(BenchContext { counter: 0, skip_odd });
          pipeline.run(ctx).await.unwrap()
        })
      });
    }
  }
  group.finish();
}

criterion_group!(benches, bench_payment_validation, bench_pipeline_run);
criterion_main!(benches);
