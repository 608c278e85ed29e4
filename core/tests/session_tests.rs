// tests/session_tests.rs
mod common;

use common::*;
use storefront::session::{RECENTLY_VIEWED_CAPACITY, RECENTLY_VIEWED_VISIBLE};
use storefront::{NoticeLevel, SessionContext};

#[test]
fn test_resolve_issues_token_once() {
  setup_tracing();
  let mut ctx = SessionContext::new();
  assert!(ctx.token().is_none());
  assert!(!ctx.is_modified());

  let first = ctx.resolve();
  assert!(ctx.is_modified());
  let second = ctx.resolve();
  assert_eq!(first, second);
  assert!(!first.as_str().is_empty());
}

#[test]
fn test_fresh_sessions_get_distinct_tokens() {
  let a = SessionContext::new().resolve();
  let b = SessionContext::new().resolve();
  assert_ne!(a, b);
}

#[test]
fn test_record_view_excludes_current_and_caps_visible() {
  let mut ctx = SessionContext::new();
  assert!(ctx.record_view(1).is_empty());
  assert_eq!(ctx.record_view(2), vec![1]);
  assert_eq!(ctx.record_view(3), vec![2, 1]);
  assert_eq!(ctx.record_view(4), vec![3, 2, 1]);
  assert_eq!(ctx.record_view(5), vec![4, 3, 2]);
  assert_eq!(ctx.recently_viewed().len(), RECENTLY_VIEWED_CAPACITY);
  assert_eq!(ctx.recently_viewed(), &[5, 4, 3, 2]);
}

#[test]
fn test_revisiting_moves_product_to_front() {
  let mut ctx = SessionContext::new();
  for id in [1, 2, 3] {
    ctx.record_view(id);
  }
  let shown = ctx.record_view(1);
  assert_eq!(shown, vec![3, 2]);
  assert_eq!(ctx.recently_viewed(), &[1, 3, 2]);
  assert!(shown.len() <= RECENTLY_VIEWED_VISIBLE);
}

#[test]
fn test_notices_are_taken_once() {
  let mut ctx = SessionContext::new();
  assert!(ctx.take_notices().is_empty());
  assert!(!ctx.is_modified());

  ctx.push_notice(NoticeLevel::Success, "Checkout successful!");
  ctx.push_notice(NoticeLevel::Warning, "Cart is empty.");
  let notices = ctx.take_notices();
  assert_eq!(notices.len(), 2);
  assert_eq!(notices[0].level, NoticeLevel::Success);
  assert_eq!(notices[1].message, "Cart is empty.");
  assert!(ctx.take_notices().is_empty());
}

#[test]
fn test_encode_decode_keeps_state_but_not_modified_flag() {
  let mut ctx = SessionContext::new();
  let token = ctx.resolve();
  ctx.record_view(7);
  ctx.push_notice(NoticeLevel::Info, "Hello");

  let raw = ctx.encode().unwrap();
  let decoded = SessionContext::decode(&raw);
  assert_eq!(decoded.token(), Some(&token));
  assert_eq!(decoded.recently_viewed(), &[7]);
  assert!(!decoded.is_modified());
}

#[test]
fn test_decode_malformed_payload_starts_fresh() {
  setup_tracing();
  let decoded = SessionContext::decode("{not json");
  assert!(decoded.token().is_none());
  assert!(decoded.recently_viewed().is_empty());
}

#[test]
fn test_decode_truncates_oversized_history() {
  let decoded = SessionContext::decode(r#"{"token":"abc","recently_viewed":[1,2,3,4,5,6]}"#);
  assert_eq!(decoded.token().map(|t| t.as_str()), Some("abc"));
  assert_eq!(decoded.recently_viewed(), &[1, 2, 3, 4]);
}
