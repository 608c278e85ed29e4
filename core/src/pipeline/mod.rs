// storefront/src/pipeline/mod.rs

//! A small step-based async workflow engine.
//!
//! A `Pipeline<TData, Err>` is an ordered list of named steps. Each step owns
//! `before`, `on` and `after` handlers that receive a shared `ContextData<TData>`,
//! may mutate it, and return `PipelineControl::Continue` or `PipelineControl::Stop`.

pub mod context;
pub mod control;
pub mod definition;
pub mod execution;
pub mod hooks;
pub mod step;

pub use context::{ContextData, Handler};
pub use control::{PipelineControl, PipelineResult};
pub use definition::Pipeline;
pub use step::{SkipCondition, StepDef};
