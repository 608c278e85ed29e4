// storefront_server/src/web/mod.rs

pub mod handlers;
pub mod request_kind;
pub mod routes;
pub mod session;
pub mod views;

pub use routes::configure_app_routes;
pub use session::persist_session;
