//! Built-in validators.

use email_address::{EmailAddress, Options};
use serde_json::json;

use super::errors::ValidationErrors;
use super::validator::{ValidatorFn, run_validators, validator};
use crate::error::FormError;
use crate::value::FieldValue;

/// Reason keys reported by the built-in validators.
pub mod keys {
    pub const REQUIRED: &str = "required";
    pub const EMAIL: &str = "email";
    pub const MIN_LENGTH: &str = "minlength";
    pub const MAX_LENGTH: &str = "maxlength";
    pub const PATTERN: &str = "pattern";
}

/// Require a non-empty value.
///
/// `Null` and `""` fail; whitespace-only text passes.
pub fn required() -> ValidatorFn {
    validator(|value| value.is_empty().then(|| ValidationErrors::single(keys::REQUIRED)))
}

/// Require a conventional `local@domain` email address.
///
/// Display names (`Max <max@example.com>`), quoted local parts, domain
/// literals and any whitespace are rejected. Empty values pass; combine with
/// [`required`] to reject them.
pub fn email() -> ValidatorFn {
    validator(|value| match value.as_str() {
        Some(text) if !text.is_empty() && !is_conventional_email(text) => {
            Some(ValidationErrors::single(keys::EMAIL))
        }
        _ => None,
    })
}

/// Require at least `min` characters. Empty values pass.
pub fn min_length(min: usize) -> ValidatorFn {
    validator(move |value| {
        let actual = non_empty_len(value)?;
        (actual < min).then(|| {
            ValidationErrors::with_detail(
                keys::MIN_LENGTH,
                json!({ "requiredLength": min, "actualLength": actual }),
            )
        })
    })
}

/// Allow at most `max` characters. Empty values pass.
pub fn max_length(max: usize) -> ValidatorFn {
    validator(move |value| {
        let actual = non_empty_len(value)?;
        (actual > max).then(|| {
            ValidationErrors::with_detail(
                keys::MAX_LENGTH,
                json!({ "requiredLength": max, "actualLength": actual }),
            )
        })
    })
}

/// Require the whole value to match a regular expression. Empty values pass.
///
/// The pattern is anchored at both ends, so `"[a-z]+"` rejects `"abc1"`.
pub fn pattern(pattern: &str) -> Result<ValidatorFn, FormError> {
    let re = regex::Regex::new(&format!("^(?:{})$", pattern))?;
    let required_pattern = format!("^{}$", pattern);
    Ok(validator(move |value| match value.as_str() {
        Some(text) if !text.is_empty() && !re.is_match(text) => {
            Some(ValidationErrors::with_detail(
                keys::PATTERN,
                json!({ "requiredPattern": required_pattern, "actualValue": text }),
            ))
        }
        _ => None,
    }))
}

/// Fold several validators into one that reports every failure.
pub fn compose(validators: Vec<ValidatorFn>) -> ValidatorFn {
    validator(move |value| run_validators(&validators, value))
}

fn is_conventional_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let options = Options::default()
        .without_display_text()
        .without_domain_literal();
    EmailAddress::parse_with_options(text, options)
        .is_ok_and(|address| address.as_str() == text && !address.local_part().starts_with('"'))
}

fn non_empty_len(value: &FieldValue) -> Option<usize> {
    value
        .as_str()
        .filter(|text| !text.is_empty())
        .map(|text| text.chars().count())
}
