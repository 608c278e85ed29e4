// storefront/src/session.rs

//! Anonymous browser identity and the state carried in the session cookie.
//!
//! `SessionContext` is request-scoped: the web layer decodes it from the client's
//! signed cookie, handlers mutate it, and it is encoded back only when `is_modified()`.

use crate::error::{ShopError, ShopResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};
use uuid::Uuid;

/// Product ids kept in the recently-viewed history.
pub const RECENTLY_VIEWED_CAPACITY: usize = 4;
/// Entries shown on a product page, excluding the product being viewed.
pub const RECENTLY_VIEWED_VISIBLE: usize = 3;

/// Opaque per-browser identifier scoping cart rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
  pub fn generate() -> Self {
    SessionToken(Uuid::new_v4().to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for SessionToken {
  fn from(raw: &str) -> Self {
    SessionToken(raw.to_string())
  }
}

impl fmt::Display for SessionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
  Success,
  Info,
  Warning,
  Error,
}

/// A one-time message shown on the next page served to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
  pub level: NoticeLevel,
  pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  token: Option<SessionToken>,
  #[serde(default)]
  recently_viewed: Vec<i64>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  notices: Vec<Notice>,
  #[serde(skip)]
  modified: bool,
}

impl SessionContext {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the session's token, issuing one on first use.
  pub fn resolve(&mut self) -> SessionToken {
    if let Some(token) = &self.token {
      return token.clone();
    }
    let token = SessionToken::generate();
    info!(session = %token, "New session created.");
    self.token = Some(token.clone());
    self.modified = true;
    token
  }

  pub fn token(&self) -> Option<&SessionToken> {
    self.token.as_ref()
  }

  pub fn recently_viewed(&self) -> &[i64] {
    &self.recently_viewed
  }

  /// Moves `product_id` to the front of the history and returns the ids to display:
  /// the most recent others, newest first.
  pub fn record_view(&mut self, product_id: i64) -> Vec<i64> {
    self.recently_viewed.retain(|id| *id != product_id);
    self.recently_viewed.insert(0, product_id);
    self.recently_viewed.truncate(RECENTLY_VIEWED_CAPACITY);
    self.modified = true;

    self
      .recently_viewed
      .iter()
      .copied()
      .filter(|id| *id != product_id)
      .take(RECENTLY_VIEWED_VISIBLE)
      .collect()
  }

  pub fn push_notice(&mut self, level: NoticeLevel, message: impl Into<String>) {
    self.notices.push(Notice {
      level,
      message: message.into(),
    });
    self.modified = true;
  }

  pub fn take_notices(&mut self) -> Vec<Notice> {
    if self.notices.is_empty() {
      return Vec::new();
    }
    self.modified = true;
    std::mem::take(&mut self.notices)
  }

  pub fn is_modified(&self) -> bool {
    self.modified
  }

  pub fn encode(&self) -> ShopResult<String> {
    serde_json::to_string(self).map_err(|e| ShopError::Session(format!("Failed to encode session: {}", e)))
  }

  /// Decodes a cookie payload. Anything unreadable yields a fresh, empty session.
  pub fn decode(raw: &str) -> Self {
    match serde_json::from_str::<SessionContext>(raw) {
      Ok(mut ctx) => {
        ctx.recently_viewed.truncate(RECENTLY_VIEWED_CAPACITY);
        ctx
      }
      Err(e) => {
        warn!(error = %e, "Discarding malformed session payload.");
        Self::default()
      }
    }
  }
}
