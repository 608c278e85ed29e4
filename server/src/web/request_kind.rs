// storefront_server/src/web/request_kind.rs

//! Extractors distinguishing in-page AJAX calls from plain form submissions.

use crate::errors::AppError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use std::convert::Infallible;
use tracing::warn;

const REQUESTED_WITH: &str = "X-Requested-With";
const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
  Ajax,
  Form,
}

impl RequestKind {
  pub fn of(req: &HttpRequest) -> Self {
    let is_ajax = req
      .headers()
      .get(REQUESTED_WITH)
      .and_then(|v| v.to_str().ok())
      .map_or(false, |v| v.eq_ignore_ascii_case(XML_HTTP_REQUEST));
    if is_ajax {
      RequestKind::Ajax
    } else {
      RequestKind::Form
    }
  }
}

impl FromRequest for RequestKind {
  type Error = Infallible;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(Ok(RequestKind::of(req)))
  }
}

/// Rejects anything that is not an AJAX call with `AppError::RequestType` (403).
#[derive(Debug, Clone, Copy)]
pub struct AjaxOnly;

impl FromRequest for AjaxOnly {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(match RequestKind::of(req) {
      RequestKind::Ajax => Ok(AjaxOnly),
      RequestKind::Form => {
        warn!(path = %req.path(), "Rejected non-AJAX request to an AJAX endpoint.");
        Err(AppError::RequestType("Invalid request type.".to_string()))
      }
    })
  }
}
