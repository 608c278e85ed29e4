// storefront_server/src/lib.rs

//! HTTP front end for the storefront: actix-web routes returning JSON page models,
//! signed-cookie sessions and the add-to-cart / checkout pipelines.

pub mod config;
pub mod errors;
pub mod pipelines;
pub mod state;
pub mod web;
