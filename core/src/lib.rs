// storefront/src/lib.rs

//! Storefront: catalog, session-scoped cart and mock checkout for a small sneaker shop.
//!
//! - `catalog`: sorted listing, search and lookups over the product table.
//! - `cart`: add / adjust / remove / totals / clear, scoped to an anonymous session.
//! - `session`: the opaque session token and the cookie-carried session state.
//! - `checkout`: payment form shape validation.
//! - `pipeline` and `registry`: a small async step engine used to compose request flows.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod db;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod registry;
pub mod session;

// --- Re-exports for the Public API ---

pub use crate::error::{PipelineError, ShopError, ShopResult};
pub use crate::pipeline::{ContextData, Handler, Pipeline, PipelineControl, PipelineResult, SkipCondition, StepDef};
pub use crate::registry::PipelineRegistry;
pub use crate::session::{Notice, NoticeLevel, SessionContext, SessionToken};
