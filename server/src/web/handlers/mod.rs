// storefront_server/src/web/handlers/mod.rs

pub mod cart_handlers;
pub mod checkout_handlers;
pub mod product_handlers;

use actix_web::http::header;
use actix_web::HttpResponse;

/// 303 See Other, so a POSTed form is followed by a GET.
pub(crate) fn redirect_to(location: &str) -> HttpResponse {
  HttpResponse::SeeOther().insert_header((header::LOCATION, location)).finish()
}
