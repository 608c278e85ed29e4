// storefront_server/src/web/session.rs

//! Cookie-backed browser sessions.
//!
//! `persist_session` loads the `SessionContext` from the signed cookie before the
//! handler runs and shares it through request extensions; handlers reach it with the
//! `BrowserSession` extractor. After the handler, the context is written back only if
//! it was modified. Error responses are persisted too.

use crate::errors::AppError;
use crate::state::AppState;
use actix_web::body::MessageBody;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, CookieJar, Key, SameSite};
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderValue, SET_COOKIE};
use actix_web::middleware::Next;
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use std::cell::RefCell;
use std::rc::Rc;
use storefront::{Notice, NoticeLevel, SessionContext, SessionToken};
use tracing::{debug, error, warn};

pub const SESSION_COOKIE: &str = "storefront_session";

type SharedSession = Rc<RefCell<SessionContext>>;

/// Request-scoped handle on the browser's session.
///
/// Every method takes a short `RefCell` borrow, so handles can be used freely
/// between `.await` points.
#[derive(Clone)]
pub struct BrowserSession(SharedSession);

impl BrowserSession {
  /// The session token, issued on first use.
  pub fn resolve(&self) -> SessionToken {
    self.0.borrow_mut().resolve()
  }

  pub fn record_view(&self, product_id: i64) -> Vec<i64> {
    self.0.borrow_mut().record_view(product_id)
  }

  pub fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
    self.0.borrow_mut().push_notice(level, message);
  }

  pub fn take_notices(&self) -> Vec<Notice> {
    self.0.borrow_mut().take_notices()
  }
}

impl FromRequest for BrowserSession {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let shared = req.extensions().get::<SharedSession>().cloned();
    ready(match shared {
      Some(shared) => Ok(BrowserSession(shared)),
      None => {
        error!("BrowserSession extractor used without the persist_session middleware.");
        Err(AppError::Internal("Session middleware is not installed.".to_string()))
      }
    })
  }
}

/// Verifies the signed session cookie and decodes it. A missing cookie, a bad
/// signature or an unreadable payload all yield an empty session.
pub fn load_session(req: &HttpRequest, key: &Key) -> SessionContext {
  let Some(cookie) = req.cookie(SESSION_COOKIE) else {
    return SessionContext::new();
  };
  let mut jar = CookieJar::new();
  jar.add_original(cookie);
  match jar.signed(key).get(SESSION_COOKIE) {
    Some(verified) => SessionContext::decode(verified.value()),
    None => {
      warn!("Session cookie failed signature verification, starting a new session.");
      SessionContext::new()
    }
  }
}

/// Signs the encoded session and renders the `Set-Cookie` header value.
///
/// The payload is JSON, so the value is percent-encoded; the request side decodes
/// it again when parsing cookies.
pub fn session_cookie_header(ctx: &SessionContext, key: &Key, ttl_hours: i64) -> Result<HeaderValue, AppError> {
  let payload = ctx.encode()?;
  let cookie = Cookie::build(SESSION_COOKIE, payload)
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .max_age(Duration::hours(ttl_hours))
    .finish();

  let mut jar = CookieJar::new();
  jar.signed_mut(key).add(cookie);
  let signed = jar
    .get(SESSION_COOKIE)
    .ok_or_else(|| AppError::Internal("Signed session cookie missing from jar.".to_string()))?;
  HeaderValue::from_str(&signed.encoded().to_string())
    .map_err(|e| AppError::Internal(format!("Session cookie is not a valid header value: {}", e)))
}

/// Middleware installed with `actix_web::middleware::from_fn(persist_session)`.
pub async fn persist_session(
  req: ServiceRequest,
  next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
  let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
    error!("AppState missing, session cookies are disabled for this request.");
    return next.call(req).await;
  };

  let shared: SharedSession = Rc::new(RefCell::new(load_session(req.request(), &state.cookie_key)));
  req.extensions_mut().insert(shared.clone());

  let mut res = next.call(req).await?;

  let ctx = shared.borrow();
  if ctx.is_modified() {
    let header = session_cookie_header(&ctx, &state.cookie_key, state.config.session_ttl_hours)?;
    res.headers_mut().append(SET_COOKIE, header);
    debug!("Session cookie written.");
  }
  Ok(res)
}
