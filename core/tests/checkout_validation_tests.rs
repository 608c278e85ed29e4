// tests/checkout_validation_tests.rs
use storefront::checkout::{validate_payment_form, PaymentForm};

fn valid_form() -> PaymentForm {
  PaymentForm {
    card_number: "4111 1111-1111 1111".to_string(),
    card_name: "Ada Lovelace".to_string(),
    expiry: "12/29".to_string(),
    cvv: "123".to_string(),
  }
}

#[test]
fn test_separators_are_ignored() {
  assert!(validate_payment_form(&valid_form()).is_empty());

  let plain = PaymentForm {
    card_number: "4111111111111111".to_string(),
    ..valid_form()
  };
  assert!(validate_payment_form(&plain).is_empty());
}

#[test]
fn test_short_or_non_numeric_card_is_rejected() {
  for card_number in ["1234", "4111 1111 1111 111", "4111 1111 1111 11112", "4111 1111 1111 111a", ""] {
    let form = PaymentForm {
      card_number: card_number.to_string(),
      ..valid_form()
    };
    let errors = validate_payment_form(&form);
    assert_eq!(errors.len(), 1, "card number {:?}", card_number);
    assert_eq!(errors.get("card_number").map(String::as_str), Some("Valid 16-digit card required."));
  }
}

#[test]
fn test_missing_name_yields_single_error() {
  let form = PaymentForm {
    card_name: String::new(),
    ..valid_form()
  };
  let errors = validate_payment_form(&form);
  assert_eq!(errors.len(), 1);
  assert_eq!(errors.get("card_name").map(String::as_str), Some("Name on card is required."));
}

#[test]
fn test_whitespace_only_fields_count_as_missing() {
  let form = PaymentForm {
    expiry: "   ".to_string(),
    cvv: "\t".to_string(),
    ..valid_form()
  };
  let errors = validate_payment_form(&form);
  assert_eq!(errors.len(), 2);
  assert_eq!(errors.get("expiry").map(String::as_str), Some("Expiry MM/YY is required."));
  assert_eq!(errors.get("cvv").map(String::as_str), Some("CVV is required."));
}

#[test]
fn test_empty_form_reports_every_field() {
  let errors = validate_payment_form(&PaymentForm::default());
  let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
  assert_eq!(fields, vec!["card_name", "card_number", "cvv", "expiry"]);
}

#[test]
fn test_redisplayed_form_keeps_entries_and_drops_cvv() {
  let entered = PaymentForm {
    card_number: "1234".to_string(),
    ..valid_form()
  };
  let shown = entered.for_redisplay();
  assert_eq!(shown.card_number, "1234");
  assert_eq!(shown.card_name, "Ada Lovelace");
  assert_eq!(shown.expiry, "12/29");
  assert_eq!(shown.cvv, "");
}

#[test]
fn test_fixing_only_the_flagged_field_passes_on_resubmit() {
  let first = PaymentForm {
    cvv: String::new(),
    ..valid_form()
  };
  let errors = validate_payment_form(&first);
  assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["cvv"]);

  let mut resubmitted = first.for_redisplay();
  resubmitted.cvv = "123".to_string();
  assert!(validate_payment_form(&resubmitted).is_empty());
}
