// storefront/src/checkout.rs

//! Payment form validation.
//!
//! This is a shape check only: the card number must be 16 digits once spaces and
//! hyphens are removed, and the other fields must be present. There is no Luhn check,
//! no payment network and no authorization. Nothing here touches the store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CARD_NUMBER_DIGITS: usize = 16;

/// Field name → message, one entry per failing field. Empty means valid.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentForm {
  #[serde(default)]
  pub card_number: String,
  #[serde(default)]
  pub card_name: String,
  #[serde(default)]
  pub expiry: String,
  #[serde(default)]
  pub cvv: String,
}

impl PaymentForm {
  /// Card number without the separators customers commonly type.
  pub fn normalized_card_number(&self) -> String {
    self.card_number.chars().filter(|c| *c != ' ' && *c != '-').collect()
  }

  /// Copy of the submitted form for redisplay after a failed validation. Every field
  /// is echoed as entered except the CVV, which is never sent back to the browser.
  pub fn for_redisplay(&self) -> PaymentForm {
    PaymentForm {
      cvv: String::new(),
      ..self.clone()
    }
  }
}

pub fn validate_payment_form(form: &PaymentForm) -> FieldErrors {
  let mut errors = FieldErrors::new();

  let digits = form.normalized_card_number();
  if digits.len() != CARD_NUMBER_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
    errors.insert("card_number".to_string(), "Valid 16-digit card required.".to_string());
  }

  let required = [
    ("card_name", "Name on card", &form.card_name),
    ("expiry", "Expiry MM/YY", &form.expiry),
    ("cvv", "CVV", &form.cvv),
  ];
  for (field, label, value) in required {
    if value.trim().is_empty() {
      errors.insert(field.to_string(), format!("{} is required.", label));
    }
  }

  errors
}
