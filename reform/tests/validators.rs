//! Tests for the built-in validators.

use reform::FieldValue;
use reform::validation::{self, ValidationErrors, keys};
use serde_json::json;

fn text(value: &str) -> FieldValue {
    FieldValue::from(value)
}

// ============================================================================
// required
// ============================================================================

#[test]
fn test_required_rejects_null_and_empty() {
    let required = validation::required();

    for value in [FieldValue::Null, text("")] {
        let errors = required(&value).expect("empty value should fail");
        assert!(errors.contains(keys::REQUIRED));
        assert_eq!(errors.len(), 1);
    }
}

#[test]
fn test_required_accepts_any_text() {
    let required = validation::required();

    assert!(required(&text("Max")).is_none());
    assert!(required(&text(" ")).is_none());
}

// ============================================================================
// email
// ============================================================================

#[test]
fn test_email_accepts_conventional_addresses() {
    let email = validation::email();

    for address in ["test@test.com", "max.mustermann@example.org", "a+b@mail.co"] {
        assert!(email(&text(address)).is_none(), "{address} should be accepted");
    }
}

#[test]
fn test_email_rejects_malformed_addresses() {
    let email = validation::email();

    for address in ["plainaddress", "@no-local.com", "spaces in@example.com"] {
        let errors = email(&text(address)).expect("malformed address should fail");
        assert!(errors.contains(keys::EMAIL), "{address} should be rejected");
    }
}

#[test]
fn test_email_rejects_unconventional_shapes() {
    let email = validation::email();

    let cases = [
        ("display name", "Max <max@example.com>"),
        ("bare angle brackets", "<max@example.com>"),
        ("quoted local part", "\"a b\"@example.com"),
        ("quoted local part without spaces", "\"max\"@example.com"),
        ("domain literal", "max@[127.0.0.1]"),
        ("leading whitespace", " max@example.com"),
        ("trailing whitespace", "max@example.com "),
        ("trailing newline", "max@example.com\n"),
        ("missing @", "max.example.com"),
        ("missing domain", "max@"),
    ];

    for (case, address) in cases {
        let errors = email(&text(address))
            .unwrap_or_else(|| panic!("{case}: {address:?} should be rejected"));
        assert!(errors.contains(keys::EMAIL), "{case}");
        assert_eq!(errors.len(), 1, "{case}");
    }
}

#[test]
fn test_email_leaves_empty_values_to_required() {
    let email = validation::email();

    assert!(email(&FieldValue::Null).is_none());
    assert!(email(&text("")).is_none());
}

// ============================================================================
// lengths and patterns
// ============================================================================

#[test]
fn test_min_length_reports_lengths() {
    let min = validation::min_length(3);

    let errors = min(&text("ab")).unwrap();
    assert_eq!(
        errors.get(keys::MIN_LENGTH),
        Some(&json!({ "requiredLength": 3, "actualLength": 2 }))
    );
    assert!(min(&text("abc")).is_none());
    assert!(min(&FieldValue::Null).is_none());
}

#[test]
fn test_max_length_counts_characters() {
    let max = validation::max_length(4);

    assert!(max(&text("über")).is_none());
    assert!(max(&text("übers")).unwrap().contains(keys::MAX_LENGTH));
}

#[test]
fn test_pattern_matches_whole_value() {
    let letters = validation::pattern("[a-z]+").unwrap();

    assert!(letters(&text("chess")).is_none());

    let errors = letters(&text("chess1")).unwrap();
    assert_eq!(
        errors.get(keys::PATTERN),
        Some(&json!({ "requiredPattern": "^[a-z]+$", "actualValue": "chess1" }))
    );
}

#[test]
fn test_pattern_rejects_invalid_regex() {
    assert!(validation::pattern("(unclosed").is_err());
}

// ============================================================================
// composition
// ============================================================================

#[test]
fn test_compose_keeps_all_reasons() {
    let check = validation::compose(vec![
        validation::min_length(5),
        validation::email(),
        validation::required(),
    ]);

    let errors = check(&text("abc")).unwrap();
    assert!(errors.contains(keys::MIN_LENGTH));
    assert!(errors.contains(keys::EMAIL));
    assert!(!errors.contains(keys::REQUIRED));
}

#[test]
fn test_custom_validator_signals_success_with_none() {
    let no_admin = validation::validator(|value| {
        (value.as_str() == Some("admin")).then(|| ValidationErrors::single("reserved"))
    });

    assert!(no_admin(&text("admin")).unwrap().contains("reserved"));
    assert_eq!(no_admin(&text("Max")), None);
}
